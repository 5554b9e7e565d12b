//! Entity report composer.
//!
//! Drives one entity's descriptor tables in the fixed merged order, turning
//! each raw query into a rendered line. The composer writes into plain
//! `fmt::Write` sinks (report and diagnostics separately) so the whole
//! surface is assertable as strings in tests and the binary only decides
//! where the two streams go.
//!
//! Failure policy, in order of severity: a failed query produces one
//! diagnostic and no value line, then rendering continues with the next
//! descriptor; an oversize reply produces an advisory diagnostic and the
//! returned bytes are rendered as if complete. Neither ever aborts the
//! entity.

use crate::descriptor::{
    self, CHANNEL_ORDERS, CHANNEL_TYPES, DEVICE_LABEL_WIDTH, IMAGE_FORMATS_LABEL,
    PLATFORM_LABEL_WIDTH, PLATFORM_PROPS, PropertyDescriptor, ValueKind, device_tables,
};
use crate::provider::{ImageFormat, PropertyKey, ProviderError, QueryReply};
use crate::render;
use std::fmt::{self, Write};

/// The slice of the provider the composer needs: one entity, any key.
///
/// Implemented for closures so callers can capture a provider handle pair
/// without threading the full provider trait through the composer.
pub trait PropertyQuery {
    fn query(&mut self, key: PropertyKey, capacity: usize) -> Result<QueryReply, ProviderError>;
}

impl<F> PropertyQuery for F
where
    F: FnMut(PropertyKey, usize) -> Result<QueryReply, ProviderError>,
{
    fn query(&mut self, key: PropertyKey, capacity: usize) -> Result<QueryReply, ProviderError> {
        self(key, capacity)
    }
}

/// Output destinations for one run: the report and its diagnostics.
pub struct Sink<'a> {
    pub out: &'a mut dyn Write,
    pub diag: &'a mut dyn Write,
}

/// Per-entity rendering context: the `platform[i]`/`device[i]` prefix every
/// line and diagnostic carries, plus the label column width.
pub struct EntityReport {
    prefix: String,
    label_width: usize,
}

impl EntityReport {
    pub fn platform(index: usize) -> Self {
        Self {
            prefix: format!("platform[{index}]"),
            label_width: PLATFORM_LABEL_WIDTH,
        }
    }

    pub fn device(index: usize) -> Self {
        Self {
            prefix: format!("device[{index}]"),
            label_width: DEVICE_LABEL_WIDTH,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The `{prefix}: {label:<width}: ` head of a value line. Continuation
    /// lines indent to this head's length so multi-line values stay aligned
    /// under the first token for any entity index.
    fn line_head(&self, label: &str) -> String {
        format!(
            "{}: {:<width$}: ",
            self.prefix,
            label,
            width = self.label_width
        )
    }

    /// Diagnostic for one failed query; the entity's report continues.
    pub fn query_failure(&self, sink: &mut Sink<'_>, label: &str, err: ProviderError) -> fmt::Result {
        writeln!(sink.diag, "{}: Unable to get {}: {}!", self.prefix, label, err)
    }

    /// Advisory diagnostic for a reply whose natural size exceeded the
    /// supplied capacity. Never a failure.
    fn truncation(
        &self,
        sink: &mut Sink<'_>,
        label: &str,
        natural: usize,
        capacity: usize,
    ) -> fmt::Result {
        writeln!(
            sink.diag,
            "{}: Large {} ({} bytes)!  Truncating to {}!",
            self.prefix, label, natural, capacity
        )
    }

    /// Query and render every descriptor of one table, in table order.
    pub fn render_table<Q: PropertyQuery>(
        &self,
        sink: &mut Sink<'_>,
        query: &mut Q,
        table: &[PropertyDescriptor],
    ) -> fmt::Result {
        for descriptor in table {
            let capacity = descriptor::capacity(descriptor.kind);
            let reply = match query.query(descriptor.key, capacity) {
                Ok(reply) => reply,
                Err(err) => {
                    self.query_failure(sink, descriptor.label, err)?;
                    continue;
                }
            };
            if reply.natural_size > capacity {
                self.truncation(sink, descriptor.label, reply.natural_size, capacity)?;
            }
            self.render_value(sink, descriptor, &reply.bytes)?;
        }
        Ok(())
    }

    fn render_value(
        &self,
        sink: &mut Sink<'_>,
        descriptor: &PropertyDescriptor,
        bytes: &[u8],
    ) -> fmt::Result {
        let head = self.line_head(descriptor.label);
        match descriptor.kind {
            ValueKind::Text => {
                writeln!(sink.out, "{head}{}", render::decode_text(bytes))
            }
            ValueKind::TokenList => {
                let text = render::decode_text(bytes);
                let tokens = render::sorted_tokens(&text);
                write_token_lines(sink.out, &head, &tokens)
            }
            ValueKind::Scalar => {
                let value = render::scalar_from_bytes(bytes);
                writeln!(sink.out, "{head}{}", render::group_thousands(value))
            }
            ValueKind::Hex => {
                let value = render::scalar_from_bytes(bytes);
                writeln!(sink.out, "{head}{}", render::hex(value))
            }
            ValueKind::Flags(flags) => {
                let value = render::scalar_from_bytes(bytes);
                writeln!(sink.out, "{head}{}", render::flag_bits(value, flags))
            }
            ValueKind::Enum(labels) => {
                let value = render::scalar_from_bytes(bytes);
                writeln!(sink.out, "{head}{}", render::bounded_enum(value, labels))
            }
            ValueKind::Triple => {
                let lanes = render::triple_from_bytes(bytes);
                writeln!(sink.out, "{head}{}", render::triple(lanes))
            }
        }
    }

    /// Render the optional pixel-format category: a count line on the label
    /// line, then one `{order}, {type}` line per format, aligned under the
    /// value column.
    pub fn render_image_formats(
        &self,
        sink: &mut Sink<'_>,
        formats: &[ImageFormat],
    ) -> fmt::Result {
        let head = self.line_head(IMAGE_FORMATS_LABEL);
        let plural = if formats.len() == 1 { "" } else { "s" };
        writeln!(sink.out, "{head}{} format{plural}", formats.len())?;
        let indent = head.chars().count();
        for format in formats {
            writeln!(
                sink.out,
                "{:indent$}{}, {}",
                "",
                render::code_name(format.channel_order, CHANNEL_ORDERS),
                render::code_name(format.channel_type, CHANNEL_TYPES),
            )?;
        }
        Ok(())
    }
}

fn write_token_lines(out: &mut dyn Write, head: &str, tokens: &[&str]) -> fmt::Result {
    let Some((first, rest)) = tokens.split_first() else {
        // No tokens is a valid value; the line keeps the full head, same as
        // every other empty-valued kind.
        return writeln!(out, "{head}");
    };
    writeln!(out, "{head}{first}")?;
    let indent = head.chars().count();
    for token in rest {
        writeln!(out, "{:indent$}{token}", "")?;
    }
    Ok(())
}

/// Compose one platform's property section.
pub fn render_platform<Q: PropertyQuery>(
    sink: &mut Sink<'_>,
    index: usize,
    query: &mut Q,
) -> fmt::Result {
    let entity = EntityReport::platform(index);
    entity.render_table(sink, query, PLATFORM_PROPS)
}

/// Compose one device's full report: every table in the merged contract
/// order, then the optional image-format category when a fetcher is given.
pub fn render_device<Q, F>(
    sink: &mut Sink<'_>,
    index: usize,
    query: &mut Q,
    image_formats: Option<F>,
) -> fmt::Result
where
    Q: PropertyQuery,
    F: FnOnce() -> Result<Vec<ImageFormat>, ProviderError>,
{
    let entity = EntityReport::device(index);
    for table in device_tables() {
        entity.render_table(sink, query, table)?;
    }
    if let Some(fetch) = image_formats {
        match fetch() {
            Ok(formats) => entity.render_image_formats(sink, &formats)?,
            Err(err) => entity.query_failure(sink, IMAGE_FORMATS_LABEL, err)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::keys;
    use std::collections::BTreeMap;

    fn scripted(
        entries: &[(PropertyKey, Result<QueryReply, ProviderError>)],
    ) -> impl FnMut(PropertyKey, usize) -> Result<QueryReply, ProviderError> + use<> {
        let map: BTreeMap<PropertyKey, Result<QueryReply, ProviderError>> =
            entries.iter().cloned().collect();
        move |key, _capacity| map.get(&key).cloned().unwrap_or(Err(ProviderError(-30)))
    }

    #[test]
    fn failed_query_leaves_no_value_line_and_rendering_continues() {
        let mut out = String::new();
        let mut diag = String::new();
        let mut sink = Sink {
            out: &mut out,
            diag: &mut diag,
        };
        let mut query = scripted(&[
            (keys::PLATFORM_NAME, Err(ProviderError(-30))),
            (
                keys::PLATFORM_VENDOR,
                Ok(QueryReply::complete(b"Acme\0".to_vec())),
            ),
            (
                keys::PLATFORM_PROFILE,
                Ok(QueryReply::complete(b"FULL_PROFILE\0".to_vec())),
            ),
            (
                keys::PLATFORM_VERSION,
                Ok(QueryReply::complete(b"OpenCL 1.2\0".to_vec())),
            ),
            (
                keys::PLATFORM_EXTENSIONS,
                Ok(QueryReply::complete(b"\0".to_vec())),
            ),
        ]);
        render_platform(&mut sink, 0, &mut query).unwrap();

        assert_eq!(diag, "platform[0]: Unable to get name: invalid value!\n");
        assert!(!out.contains("name"));
        assert!(out.contains("platform[0]: vendor    : Acme\n"));
    }

    #[test]
    fn oversize_reply_is_advisory_and_still_rendered() {
        let mut out = String::new();
        let mut diag = String::new();
        let mut sink = Sink {
            out: &mut out,
            diag: &mut diag,
        };
        let entity = EntityReport::device(3);
        let mut query = |_key: PropertyKey, capacity: usize| {
            Ok(QueryReply {
                bytes: 0x1fu64.to_le_bytes()[..capacity].to_vec(),
                natural_size: 16,
            })
        };
        entity
            .render_table(&mut sink, &mut query, crate::descriptor::DEVICE_HEX_PROPS)
            .unwrap();

        assert!(diag.contains("device[3]: Large SINGLE_FP_CONFIG (16 bytes)!  Truncating to 8!"));
        assert!(out.contains("device[3]: SINGLE_FP_CONFIG              : 0x1f\n"));
    }

    #[test]
    fn token_lines_align_under_the_first_token() {
        let mut out = String::new();
        let mut diag = String::new();
        let mut sink = Sink {
            out: &mut out,
            diag: &mut diag,
        };
        let entity = EntityReport::platform(0);
        let mut query = |_key: PropertyKey, _capacity: usize| {
            Ok(QueryReply::complete(b"zeta alpha midway\0".to_vec()))
        };
        entity
            .render_table(
                &mut sink,
                &mut query,
                &PLATFORM_PROPS[PLATFORM_PROPS.len() - 1..],
            )
            .unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "platform[0]: extensions: alpha");
        let column = lines[0].find("alpha").unwrap();
        assert_eq!(lines[1], format!("{:column$}{}", "", "midway"));
        assert_eq!(lines[2], format!("{:column$}{}", "", "zeta"));
    }

    #[test]
    fn empty_token_list_keeps_the_full_head() {
        let mut out = String::new();
        let mut diag = String::new();
        let mut sink = Sink {
            out: &mut out,
            diag: &mut diag,
        };
        let entity = EntityReport::platform(0);
        let mut query =
            |_key: PropertyKey, _capacity: usize| Ok(QueryReply::complete(b"\0".to_vec()));
        entity
            .render_table(
                &mut sink,
                &mut query,
                &PLATFORM_PROPS[PLATFORM_PROPS.len() - 1..],
            )
            .unwrap();

        // Same line shape as a zero bitmask or any other empty value.
        assert_eq!(out, "platform[0]: extensions: \n");
        assert!(diag.is_empty());
    }

    #[test]
    fn image_format_section_counts_and_lists() {
        let mut out = String::new();
        let mut diag = String::new();
        let mut sink = Sink {
            out: &mut out,
            diag: &mut diag,
        };
        let entity = EntityReport::device(0);
        let formats = [
            ImageFormat {
                channel_order: 0x10B5,
                channel_type: 0x10D2,
            },
            ImageFormat {
                channel_order: 0xdead,
                channel_type: 0x10DE,
            },
        ];
        entity.render_image_formats(&mut sink, &formats).unwrap();

        assert!(out.contains("IMAGE FORMATS                 : 2 formats\n"));
        assert!(out.contains("CL_RGBA, CL_UNORM_INT8"));
        assert!(out.contains("UNKNOWN (0xdead), CL_FLOAT"));
    }
}

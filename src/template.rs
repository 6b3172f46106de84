//! Content template rendering for lock file stamping.
//!
//! A template is a literal string with recognized substitution fields:
//! `{pid}` and `{hostname}`. Rendering is a pure function of the template
//! and an [`Identity`] snapshot; it is evaluated once per acquisition,
//! never cached.
//!
//! # Unrecognized fields
//!
//! Anything brace-delimited that is not a recognized field (including an
//! unterminated `{`) is ignored: it passes through to the output verbatim.
//! This keeps rendering total over arbitrary caller strings instead of
//! reintroducing open-ended dynamic formatting.

use crate::identity::Identity;

/// A substitution field recognized inside a content template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `{pid}`: decimal OS process identifier of the acquiring process.
    Pid,
    /// `{hostname}`: network hostname of the acquiring machine.
    Hostname,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "pid" => Some(Field::Pid),
            "hostname" => Some(Field::Hostname),
            _ => None,
        }
    }
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed content template.
///
/// Parsing never fails; see the module docs for the unrecognized-field
/// policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTemplate {
    segments: Vec<Segment>,
}

impl ContentTemplate {
    /// Parse a raw template string.
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];

            match after_open.find('}') {
                Some(close) => {
                    let name = &after_open[..close];
                    if let Some(field) = Field::from_name(name) {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        segments.push(Segment::Field(field));
                    } else {
                        // Unrecognized field: keep the braces verbatim.
                        literal.push('{');
                        literal.push_str(name);
                        literal.push('}');
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    // Unterminated brace: the remainder is literal text.
                    literal.push('{');
                    literal.push_str(after_open);
                    rest = "";
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Render the template against an acquiring identity.
    pub fn render(&self, identity: &Identity) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Pid) => out.push_str(&identity.pid.to_string()),
                Segment::Field(Field::Hostname) => out.push_str(&identity.hostname),
            }
        }
        out
    }

    /// Whether the template produces no output at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for ContentTemplate {
    /// The default template stamps no identity payload.
    fn default() -> Self {
        Self::parse("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            pid: 123,
            hostname: "myhostname".to_string(),
        }
    }

    #[test]
    fn renders_pid_field() {
        let template = ContentTemplate::parse("{pid}");
        assert_eq!(template.render(&identity()), "123");
    }

    #[test]
    fn renders_hostname_field() {
        let template = ContentTemplate::parse("{hostname}");
        assert_eq!(template.render(&identity()), "myhostname");
    }

    #[test]
    fn renders_combined_template() {
        let template = ContentTemplate::parse("{pid}/{hostname}");
        assert_eq!(template.render(&identity()), "123/myhostname");
    }

    #[test]
    fn literal_text_passes_through() {
        let template = ContentTemplate::parse("held by pid {pid} on {hostname}!");
        assert_eq!(
            template.render(&identity()),
            "held by pid 123 on myhostname!"
        );
    }

    #[test]
    fn unrecognized_field_is_kept_verbatim() {
        let template = ContentTemplate::parse("{user}@{hostname}");
        assert_eq!(template.render(&identity()), "{user}@myhostname");
    }

    #[test]
    fn unterminated_brace_is_literal() {
        let template = ContentTemplate::parse("{pid}/{host");
        assert_eq!(template.render(&identity()), "123/{host");
    }

    #[test]
    fn empty_template_renders_empty() {
        let template = ContentTemplate::default();
        assert!(template.is_empty());
        assert_eq!(template.render(&identity()), "");
    }

    #[test]
    fn render_reflects_the_given_identity() {
        let template = ContentTemplate::parse("{pid}/{hostname}");
        let other = Identity {
            pid: 456,
            hostname: "elsewhere".to_string(),
        };
        assert_eq!(template.render(&other), "456/elsewhere");
    }
}

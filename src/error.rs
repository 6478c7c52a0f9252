use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors surfaced by the builders.
///
/// All of these are detectable at setup time; a host that wants
/// abort-on-misconfiguration semantics propagates them out of startup.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed optical property table (length mismatch, unordered grid, ...).
    #[error("property table: {0}")]
    InvalidProperty(String),

    /// Inconsistent material definition.
    #[error("material `{name}`: {reason}")]
    InvalidMaterial { name: String, reason: String },

    /// Lookup of a standard material or element that the registry does not carry.
    #[error("no entry named `{0}` in the material registry")]
    UnknownMaterial(String),

    /// Ill-formed volume placement (missing world, unknown mother, ...).
    #[error("geometry: {0}")]
    InvalidPlacement(String),

    /// A placement failed the overlap check against its mother or a sibling.
    #[error("volume `{volume}` fails overlap check: {detail}")]
    Overlap { volume: String, detail: String },

    /// Inconsistent particle source description.
    #[error("source: {0}")]
    InvalidSource(String),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn overlap_message_names_the_volume() {
        let e = Error::Overlap {
            volume: "Scintillator".to_string(),
            detail: "protrudes from mother `World`".to_string(),
        };
        let msg = format!("{}", e);
        assert!(msg.contains("Scintillator"));
        assert!(msg.contains("World"));
    }
}

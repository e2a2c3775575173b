//! Helpers for composite resource identifiers

/// Separator between the parts of a composite identifier
pub const ID_SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdError {
    #[error(
        "The given id {id} does not contain {separator} please check documentation on how to provide id during import command"
    )]
    MissingSeparator { id: String, separator: String },

    #[error("The given id {id} must have {expected} parts separated by {separator}, got {got}")]
    WrongPartCount {
        id: String,
        separator: String,
        expected: usize,
        got: usize,
    },
}

/// Split a composite identifier into exactly `expected` non-empty parts
pub fn sep_id_parts(id: &str, separator: &str, expected: usize) -> Result<Vec<String>, IdError> {
    if !id.contains(separator) {
        return Err(IdError::MissingSeparator {
            id: id.to_string(),
            separator: separator.to_string(),
        });
    }
    let parts: Vec<String> = id.split(separator).map(str::to_string).collect();
    let present = parts.iter().filter(|p| !p.is_empty()).count();
    if parts.len() != expected || present != expected {
        return Err(IdError::WrongPartCount {
            id: id.to_string(),
            separator: separator.to_string(),
            expected,
            got: present,
        });
    }
    Ok(parts)
}

/// Join identifier parts (e.g. product and plan IDs) into one identifier
pub fn compose_id(parts: &[&str]) -> String {
    parts.join(ID_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sep_id_parts() {
        let parts = sep_id_parts("prod/cat/plan", ID_SEPARATOR, 3).unwrap();
        assert_eq!(parts, vec!["prod", "cat", "plan"]);
    }

    #[test]
    fn test_sep_id_parts_without_separator() {
        let err = sep_id_parts("plan", ID_SEPARATOR, 3).unwrap_err();
        assert!(matches!(err, IdError::MissingSeparator { .. }));
        assert!(err.to_string().starts_with("The given id plan does not contain /"));
    }

    #[test]
    fn test_sep_id_parts_wrong_count() {
        assert_eq!(
            sep_id_parts("prod/name/extra", ID_SEPARATOR, 2),
            Err(IdError::WrongPartCount {
                id: "prod/name/extra".to_string(),
                separator: "/".to_string(),
                expected: 2,
                got: 3,
            })
        );
    }

    #[test]
    fn test_sep_id_parts_empty_segment() {
        for id in ["prod/", "/registration", "prod//plan"] {
            let expected = id.split(ID_SEPARATOR).count();
            match sep_id_parts(id, ID_SEPARATOR, expected) {
                Err(IdError::WrongPartCount { got, .. }) => assert!(got < expected, "{}", id),
                other => panic!("{} accepted: {:?}", id, other),
            }
        }
    }

    #[test]
    fn test_compose_id() {
        assert_eq!(compose_id(&["prod", "registration"]), "prod/registration");
    }
}

//! Translation of raw resource errors into resource failures.
//!
//! # Responsibilities
//! - Fan out every (object, field, problem) triple into one failure
//! - Drop everything when the raw errors could not be parsed
//! - Skip individual entries that cannot become a failure
//!
//! # Design Decisions
//! - Never aborts partway: collect what succeeds, log and skip the rest
//! - Returns an empty vector rather than an error; the caller already holds
//!   the update error that matters

use crate::failures::resource::{ResourceError, ResourceErrorsParseError, ResourceFailure};

/// Translate resource errors reported by a failed update into failures.
///
/// When `parse_error` is set the resource errors are not trusted and the
/// result is empty.
pub fn resource_errors_to_resource_failures(
    resource_errors: &[ResourceError],
    parse_error: Option<&ResourceErrorsParseError>,
) -> Vec<ResourceFailure> {
    if let Some(parse_error) = parse_error {
        tracing::error!(error = %parse_error, "Failed parsing resource errors");
        return Vec::new();
    }

    let mut out = Vec::new();
    for resource_error in resource_errors {
        let object = resource_error.object_reference();
        for (field, problem) in &resource_error.problems {
            tracing::debug!(
                name = %resource_error.name,
                field = %field,
                problem = %problem,
                "Adding failure"
            );
            match ResourceFailure::new(format!("invalid {}: {}", field, problem), object.clone()) {
                Ok(failure) => out.push(failure),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        object = %object,
                        field = %field,
                        "Could not create resource failure event"
                    );
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn resource_error(kind: &str, name: &str, problems: &[(&str, &str)]) -> ResourceError {
        ResourceError {
            kind: kind.to_string(),
            api_version: "networking.k8s.io/v1".to_string(),
            namespace: "ns".to_string(),
            name: name.to_string(),
            uid: format!("uid-{}", name),
            problems: problems
                .iter()
                .map(|(f, p)| (f.to_string(), p.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_single_problem() {
        let errors = vec![resource_error("Route", "r1", &[("path", "must start with /")])];
        let failures = resource_errors_to_resource_failures(&errors, None);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message(), "invalid path: must start with /");
        assert_eq!(failures[0].causing_object().to_string(), "Route/ns/r1");
        assert_eq!(failures[0].causing_object().uid, "uid-r1");
    }

    #[test]
    fn test_fans_out_one_failure_per_problem() {
        let errors = vec![
            resource_error("Ingress", "a", &[("host", "bad host"), ("path", "bad path")]),
            resource_error("Service", "b", &[("port", "out of range")]),
            resource_error("KongPlugin", "c", &[]),
            resource_error(
                "HTTPRoute",
                "d",
                &[("hostnames", "empty"), ("rules", "too many"), ("parentRefs", "missing")],
            ),
        ];
        let failures = resource_errors_to_resource_failures(&errors, None);

        assert_eq!(failures.len(), 6);
        // problems are visited in field order within each object
        let messages: Vec<_> = failures.iter().map(|f| f.message()).collect();
        assert_eq!(
            messages,
            vec![
                "invalid host: bad host",
                "invalid path: bad path",
                "invalid port: out of range",
                "invalid hostnames: empty",
                "invalid parentRefs: missing",
                "invalid rules: too many",
            ]
        );
    }

    #[test]
    fn test_parse_error_discards_everything() {
        let errors = vec![resource_error("Route", "r1", &[("path", "must start with /")])];
        let parse_error = ResourceErrorsParseError("unexpected end of JSON input".to_string());

        assert!(resource_errors_to_resource_failures(&errors, Some(&parse_error)).is_empty());
        assert!(resource_errors_to_resource_failures(&[], Some(&parse_error)).is_empty());
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let errors = vec![
            resource_error("Route", "", &[("path", "must start with /")]),
            resource_error("", "orphan", &[("path", "must start with /")]),
            resource_error("Route", "r2", &[("hosts", "invalid wildcard")]),
        ];
        let failures = resource_errors_to_resource_failures(&errors, None);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].causing_object().name, "r2");
    }

    #[test]
    fn test_no_errors_yields_no_failures() {
        assert!(resource_errors_to_resource_failures(&[], None).is_empty());
    }
}

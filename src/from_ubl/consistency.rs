//! Envelope check: UBL version and Peppol process identifier.

use crate::core::{ErrorKind, ErrorList, Text};
use crate::ubl::UblDocument;

use super::MappingContext;

const SUPPORTED_UBL_VERSIONS: [&str; 2] = ["2.0", "2.1"];

pub(crate) fn check(doc: &UblDocument, ctx: &MappingContext<'_>, errors: &mut ErrorList) {
    match doc.ubl_version_id.as_deref().map(str::trim) {
        None | Some("") => ctx.error(errors, ErrorKind::Envelope, "UBLVersionID", Text::NoUblVersion),
        Some(v) if !SUPPORTED_UBL_VERSIONS.contains(&v) => ctx.error(
            errors,
            ErrorKind::Envelope,
            "UBLVersionID",
            Text::InvalidUblVersion(v.to_string()),
        ),
        Some(_) => {}
    }

    match doc.profile_id.as_deref().map(str::trim) {
        None | Some("") => ctx.error(errors, ErrorKind::Envelope, "ProfileID", Text::NoProfileId),
        Some(id) if ctx.code_lists.resolve_process_profile(id).is_none() => ctx.error(
            errors,
            ErrorKind::Envelope,
            "ProfileID",
            Text::InvalidProfileId(id.to_string()),
        ),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codes::PEPPOL_BILLING_PROFILE_ID;
    use crate::core::{ConverterConfig, Language, StandardCodeLists};

    fn run(version: Option<&str>, profile: Option<&str>) -> ErrorList {
        let config = ConverterConfig::default();
        let ctx = MappingContext {
            config: &config,
            code_lists: &StandardCodeLists,
            language: Language::English,
        };
        let doc = UblDocument {
            ubl_version_id: version.map(Into::into),
            profile_id: profile.map(Into::into),
            ..Default::default()
        };
        let mut errors = ErrorList::new();
        check(&doc, &ctx, &mut errors);
        errors
    }

    #[test]
    fn accepts_supported_envelope() {
        assert!(run(Some("2.1"), Some(PEPPOL_BILLING_PROFILE_ID)).is_empty());
        assert!(run(Some("2.0"), Some(PEPPOL_BILLING_PROFILE_ID)).is_empty());
    }

    #[test]
    fn reports_version_and_profile() {
        let errors = run(None, Some("urn:unknown"));
        assert_eq!(errors.len(), 2);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["UBLVersionID", "ProfileID"]);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Envelope));
    }

    #[test]
    fn rejects_unknown_version() {
        let errors = run(Some("2.2"), Some(PEPPOL_BILLING_PROFILE_ID));
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().message.contains("'2.2'"));
    }
}

use tracing::{debug, warn};

use crate::{
    domain::ResumeSchema,
    form::{FormError, section_schema},
};

use super::issue::AnalysisReport;

/// Align a freshly fetched report with the active schema before indexing.
///
/// Every issue is re-homed to the section it was delivered under, and issues
/// naming a field the section does not have are demoted to section level.
/// Item ids are left alone so orphaned entries stay correlated. Returns how
/// many issues were adjusted.
pub fn sanitize_report(report: &mut AnalysisReport, schema: &ResumeSchema) -> Result<usize, FormError> {
    let mut adjusted = 0;
    for section in &mut report.sections {
        let section_schema = section_schema(schema, &section.section_key)?;
        for issue in &mut section.issues {
            let mut touched = false;
            if issue.section_key != section.section_key {
                debug!(
                    from = %issue.section_key,
                    to = %section.section_key,
                    "analysis issue re-homed"
                );
                issue.section_key.clone_from(&section.section_key);
                touched = true;
            }
            if let Some(field_key) = issue.field_key.as_deref()
                && !section_schema.has_field(field_key)
            {
                warn!(
                    section = %section.section_key,
                    field = field_key,
                    "analysis issue names an unknown field; demoted to section level"
                );
                issue.field_key = None;
                issue.item_id = None;
                touched = true;
            }
            if touched {
                adjusted += 1;
            }
        }
    }
    Ok(adjusted)
}

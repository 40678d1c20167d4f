//! Rule bodies, one function per remediation.
//!
//! Every rule checks its post-condition first: when it already holds the rule logs a skipped
//! entry and leaves the tree alone.

mod attributes;
mod duplicates;
mod forms;
pub(crate) mod structure;
mod tables;

use crate::catalog::Remediation;
use crate::engine::{EngineError, Pass};
use a11yfix_dom::MarkupTree;

pub(crate) fn apply_node<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    remediation: Remediation,
    finding_id: &str,
    node: T::Handle,
    selector: &str,
) -> Result<(), EngineError> {
    match remediation {
        Remediation::ImageAlt => attributes::image_alt(pass, finding_id, node, selector),
        Remediation::AriaRole => attributes::aria_role(pass, finding_id, node, selector),
        Remediation::ColorContrast => attributes::contrast_marker(pass, finding_id, node, selector),
        Remediation::PositiveTabindex => {
            attributes::positive_tabindex(pass, finding_id, node, selector)
        }
        Remediation::AccessibleName(target) => {
            attributes::accessible_name(pass, finding_id, target, node, selector)
        }
        Remediation::FormLabel => forms::label(pass, finding_id, node, selector),
        Remediation::TableHeaders => tables::headers(pass, finding_id, node, selector),
        Remediation::DuplicateId => duplicates::duplicate_id(pass, finding_id, node, selector),
        Remediation::HtmlLang
        | Remediation::HeadingOrder
        | Remediation::SkipLink
        | Remediation::MainLandmark => apply_document(pass, remediation, finding_id),
    }
}

pub(crate) fn apply_document<T: MarkupTree>(
    pass: &mut Pass<'_, T>,
    remediation: Remediation,
    finding_id: &str,
) -> Result<(), EngineError> {
    match remediation {
        Remediation::HtmlLang => structure::ensure_lang(pass, finding_id, true),
        Remediation::HeadingOrder => structure::heading_order(pass, finding_id),
        Remediation::SkipLink => structure::skip_link(pass, finding_id),
        Remediation::MainLandmark => structure::main_landmark(pass, finding_id),
        other => {
            pass.debug(format!("{other:?} needs a target element; '{finding_id}' ignored"));
            Ok(())
        }
    }
}

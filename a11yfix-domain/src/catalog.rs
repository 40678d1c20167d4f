//! The closed set of remediations and the finding ids that trigger them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Applied to every element a finding's selectors resolve to.
    PerMatch,
    /// Applied once per finding, whatever its node list says.
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameTarget {
    Link,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "target")]
pub enum Remediation {
    ImageAlt,
    HtmlLang,
    FormLabel,
    HeadingOrder,
    AriaRole,
    ColorContrast,
    PositiveTabindex,
    SkipLink,
    MainLandmark,
    AccessibleName(NameTarget),
    TableHeaders,
    DuplicateId,
}

impl Remediation {
    pub const ALL: &'static [Remediation] = &[
        Remediation::ImageAlt,
        Remediation::HtmlLang,
        Remediation::FormLabel,
        Remediation::HeadingOrder,
        Remediation::AriaRole,
        Remediation::ColorContrast,
        Remediation::PositiveTabindex,
        Remediation::SkipLink,
        Remediation::MainLandmark,
        Remediation::AccessibleName(NameTarget::Link),
        Remediation::AccessibleName(NameTarget::Button),
        Remediation::TableHeaders,
        Remediation::DuplicateId,
    ];

    /// What the mutation does, in one line.
    pub fn mutation(self) -> &'static str {
        match self {
            Remediation::ImageAlt => "adds alt=\"\" when the attribute is absent",
            Remediation::HtmlLang => "sets lang=\"en\" on <html> when it is absent or blank",
            Remediation::FormLabel => {
                "inserts a <label for> immediately before the field, giving the field an id if needed"
            }
            Remediation::HeadingOrder => "inserts a default <h1> as the first <body> child when there is none",
            Remediation::AriaRole => "adds role=\"region\" when the element has no role",
            Remediation::ColorContrast => {
                "appends a visible outline marker to the inline style"
            }
            Remediation::PositiveTabindex => "removes tabindex when it is a positive integer",
            Remediation::SkipLink => {
                "inserts a \"Skip to main content\" anchor as the first <body> child, pointing at the main landmark"
            }
            Remediation::MainLandmark => {
                "wraps the <body> content in a <main> landmark when there is none"
            }
            Remediation::AccessibleName(NameTarget::Link) => {
                "adds aria-label=\"Descriptive link\" when the link has no text or name attribute"
            }
            Remediation::AccessibleName(NameTarget::Button) => {
                "adds aria-label=\"Descriptive button\" when the button has no text or name attribute"
            }
            Remediation::TableHeaders => {
                "promotes the first row's <td> cells to <th scope=\"col\"> when the table has no header cells"
            }
            Remediation::DuplicateId => {
                "keeps the id on its first occurrence and gives later occurrences a suffixed id"
            }
        }
    }

    /// When the mutation is skipped.
    pub fn post_condition(self) -> &'static str {
        match self {
            Remediation::ImageAlt => "alt attribute present",
            Remediation::HtmlLang => "non-empty lang on <html>",
            Remediation::FormLabel => "field already has an associated label",
            Remediation::HeadingOrder => "at least one <h1>",
            Remediation::AriaRole => "role attribute present",
            Remediation::ColorContrast => "outline marker already in the style",
            Remediation::PositiveTabindex => "tabindex absent or not positive",
            Remediation::SkipLink => "skip link with id a11y-skip-link present",
            Remediation::MainLandmark => "exactly one main landmark",
            Remediation::AccessibleName(_) => "text, image alt, aria-label, aria-labelledby or title present",
            Remediation::TableHeaders => "table has header cells",
            Remediation::DuplicateId => "element is the first with its id",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    pub finding_id: &'static str,
    pub scope: Scope,
    pub remediation: Remediation,
    pub title: &'static str,
}

const fn entry(
    finding_id: &'static str,
    scope: Scope,
    remediation: Remediation,
    title: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        finding_id,
        scope,
        remediation,
        title,
    }
}

/// Every remediation the engine knows, keyed by finding id.
///
/// An id may appear more than once; its entries run in table order.
pub const CATALOG: &[CatalogEntry] = &[
    entry("image-alt", Scope::PerMatch, Remediation::ImageAlt, "Add empty alt to images"),
    entry("html-has-lang", Scope::Document, Remediation::HtmlLang, "Set document language"),
    entry("label", Scope::PerMatch, Remediation::FormLabel, "Label form fields"),
    entry(
        "form-field-multiple-label",
        Scope::PerMatch,
        Remediation::FormLabel,
        "Label form fields",
    ),
    entry("heading-order", Scope::Document, Remediation::HeadingOrder, "Ensure a level-one heading"),
    entry("aria-roles", Scope::PerMatch, Remediation::AriaRole, "Add a region role"),
    entry("aria-valid-attr", Scope::PerMatch, Remediation::AriaRole, "Add a region role"),
    entry(
        "color-contrast",
        Scope::PerMatch,
        Remediation::ColorContrast,
        "Mark low-contrast text",
    ),
    entry("tabindex", Scope::PerMatch, Remediation::PositiveTabindex, "Remove positive tabindex"),
    entry("skip-link", Scope::Document, Remediation::SkipLink, "Add a skip link"),
    entry("landmark-one-main", Scope::Document, Remediation::MainLandmark, "Ensure a main landmark"),
    entry("region", Scope::Document, Remediation::MainLandmark, "Ensure a main landmark"),
    entry("bypass", Scope::Document, Remediation::MainLandmark, "Ensure a main landmark"),
    entry("bypass", Scope::Document, Remediation::SkipLink, "Add a skip link"),
    entry(
        "link-name",
        Scope::PerMatch,
        Remediation::AccessibleName(NameTarget::Link),
        "Name empty links",
    ),
    entry(
        "button-name",
        Scope::PerMatch,
        Remediation::AccessibleName(NameTarget::Button),
        "Name empty buttons",
    ),
    entry("table-headers", Scope::PerMatch, Remediation::TableHeaders, "Promote table header cells"),
    entry("duplicate-id", Scope::PerMatch, Remediation::DuplicateId, "Make ids unique"),
    entry("duplicate-id-active", Scope::PerMatch, Remediation::DuplicateId, "Make ids unique"),
    entry("duplicate-id-aria", Scope::PerMatch, Remediation::DuplicateId, "Make ids unique"),
];

/// Entries for a finding id, in table order. Unknown ids yield nothing.
pub fn entries_for(finding_id: &str) -> Vec<&'static CatalogEntry> {
    CATALOG
        .iter()
        .filter(|e| e.finding_id == finding_id)
        .collect()
}

/// Supported finding ids, deduplicated, in table order.
pub fn supported_ids() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for e in CATALOG {
        if !out.contains(&e.finding_id) {
            out.push(e.finding_id);
        }
    }
    out
}

/// Rules that run on every pass before any finding is looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Baseline {
    Title,
    Language,
    Landmark,
    Heading,
    HeadingRelocation,
}

impl Baseline {
    /// Execution order.
    pub const ORDER: [Baseline; 5] = [
        Baseline::Title,
        Baseline::Language,
        Baseline::Landmark,
        Baseline::Heading,
        Baseline::HeadingRelocation,
    ];

    /// The `type` recorded on fixes this baseline produces.
    pub fn fix_type(self) -> &'static str {
        match self {
            Baseline::Title => "document-title",
            Baseline::Language => "html-has-lang",
            Baseline::Landmark => "landmark-one-main",
            Baseline::Heading => "page-has-heading-one",
            Baseline::HeadingRelocation => "heading-relocation",
        }
    }

    pub fn guarantee(self) -> &'static str {
        match self {
            Baseline::Title => "a non-empty <title> in <head> (\"Untitled document\" when created)",
            Baseline::Language => "a non-empty lang on <html> (\"en\" when created)",
            Baseline::Landmark => {
                "exactly one main landmark; extra <main> elements become <div>, extra role=\"main\" is removed"
            }
            Baseline::Heading => "at least one <h1>, created from the title inside the main landmark",
            Baseline::HeadingRelocation => "every <h1> lives inside the main landmark, in document order",
        }
    }
}

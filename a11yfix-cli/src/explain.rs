//! Rule explanations for the `a11yfix explain` command.
//!
//! Each remediation carries:
//! - What it changes in the markup
//! - When it leaves the markup alone
//! - How to fix the underlying problem by hand

use a11yfix_domain::catalog::{Baseline, CATALOG, NameTarget, Remediation, Scope, entries_for, supported_ids};

/// User-facing documentation for one remediation.
#[derive(Debug, Clone)]
pub struct RuleExplanation {
    /// Short key (e.g., "image-alt").
    pub key: &'static str,
    pub remediation: Remediation,
    /// Why the defect matters.
    pub description: &'static str,
    /// Why the automatic change is limited the way it is.
    pub rationale: &'static str,
    /// What a person still has to do.
    pub guidance: &'static str,
}

/// Registry of all remediation explanations.
pub static RULE_REGISTRY: &[RuleExplanation] = &[
    RuleExplanation {
        key: "image-alt",
        remediation: Remediation::ImageAlt,
        description: r#"Images need a text alternative. Screen readers announce the file name of an
image without one, which is noise at best and misleading at worst."#,
        rationale: r#"An empty alt marks the image as decorative. That silences the file name but
cannot describe the picture, so it is only a stopgap. Images that already carry
an alt attribute, even an empty one, are never touched."#,
        guidance: r#"Replace the empty alt with a short description of what the image conveys:
    <img src="chart.png" alt="Sales doubled between 2023 and 2024">
Keep alt="" only for purely decorative images."#,
    },
    RuleExplanation {
        key: "html-lang",
        remediation: Remediation::HtmlLang,
        description: r#"The document language tells assistive technology which pronunciation rules
to use. Without it, speech output guesses, often wrongly."#,
        rationale: r#"English is assumed. A non-empty lang is left as it is, even when it is wrong."#,
        guidance: r#"Set lang to the page's real language:
    <html lang="de">"#,
    },
    RuleExplanation {
        key: "form-label",
        remediation: Remediation::FormLabel,
        description: r#"Form fields need a programmatic label so users know what to enter."#,
        rationale: r#"The label text is taken from the placeholder, aria-label, title or name of the
field, in that order, falling back to the field type. A field that is already
wrapped in a label or referenced by one keeps its markup."#,
        guidance: r#"Review the generated label text and reword it for your users. Prefer a
visible label over placeholder-only fields."#,
    },
    RuleExplanation {
        key: "heading-order",
        remediation: Remediation::HeadingOrder,
        description: r#"Pages should start their heading outline at level one so users of heading
navigation can find the main topic."#,
        rationale: r#"Only a missing level-one heading is added. Skipped levels further down the
outline are left for a person to restructure."#,
        guidance: r#"Give the page one <h1> naming its topic and nest other headings without
skipping levels."#,
    },
    RuleExplanation {
        key: "aria-role",
        remediation: Remediation::AriaRole,
        description: r#"Elements flagged for invalid ARIA usage get a neutral landmark role so they
are at least exposed as a named region."#,
        rationale: r#"Elements with any role attribute, valid or not, are left alone. Fixing a wrong
role needs knowledge of the widget's behaviour."#,
        guidance: r#"Pick the role that matches the element's behaviour, or drop ARIA and use the
native element instead."#,
    },
    RuleExplanation {
        key: "color-contrast",
        remediation: Remediation::ColorContrast,
        description: r#"Text must contrast sufficiently with its background to be readable."#,
        rationale: r#"Colours are never changed automatically. A dashed outline is added so the
element stands out during manual review. The outline is added once."#,
        guidance: r#"Adjust foreground or background colours to reach at least 4.5:1 (3:1 for
large text), then remove the outline marker."#,
    },
    RuleExplanation {
        key: "positive-tabindex",
        remediation: Remediation::PositiveTabindex,
        description: r#"Positive tabindex values pull elements out of the natural focus order, which
confuses keyboard users."#,
        rationale: r#"Only positive integers are removed. tabindex="0" and negative values have
legitimate uses and are kept."#,
        guidance: r#"Reorder the markup so the natural order matches the visual order."#,
    },
    RuleExplanation {
        key: "skip-link",
        remediation: Remediation::SkipLink,
        description: r#"Keyboard users need a way to bypass repeated navigation and jump straight to
the main content."#,
        rationale: r#"The link is identified by a fixed id, so it is inserted at most once. The main
landmark receives an id only when it has none."#,
        guidance: r#"Style the skip link so it becomes visible on focus."#,
    },
    RuleExplanation {
        key: "main-landmark",
        remediation: Remediation::MainLandmark,
        description: r#"A page should have exactly one main landmark so assistive technology can jump
to its primary content."#,
        rationale: r#"When no landmark exists, the existing body content is moved into a new <main>.
Nothing happens when a main landmark already exists."#,
        guidance: r#"Move navigation, banners and footers out of <main> so only the primary content
remains inside it."#,
    },
    RuleExplanation {
        key: "link-name",
        remediation: Remediation::AccessibleName(NameTarget::Link),
        description: r#"Links need an accessible name describing their destination."#,
        rationale: r#"A placeholder aria-label is added only when the link has no text, no image
with alt text and no naming attribute."#,
        guidance: r#"Replace the placeholder with text describing the link target."#,
    },
    RuleExplanation {
        key: "button-name",
        remediation: Remediation::AccessibleName(NameTarget::Button),
        description: r#"Buttons need an accessible name describing their action."#,
        rationale: r#"A placeholder aria-label is added only when the button has no text, no image
with alt text and no naming attribute."#,
        guidance: r#"Replace the placeholder with text describing what the button does."#,
    },
    RuleExplanation {
        key: "table-headers",
        remediation: Remediation::TableHeaders,
        description: r#"Data tables need header cells so each value can be announced with its column."#,
        rationale: r#"Only tables without any header cell are changed, and only their first row is
promoted."#,
        guidance: r#"Check that the first row really holds column headers. Use scope="row" for row
headers, or mark layout tables with role="presentation"."#,
    },
    RuleExplanation {
        key: "duplicate-id",
        remediation: Remediation::DuplicateId,
        description: r#"Ids must be unique. Labels, ARIA references and fragment links resolve to the
first match only."#,
        rationale: r#"The first element in document order keeps the id. Later elements get a
suffixed id, so references to them must be updated by hand."#,
        guidance: r##"Search for references (for=, aria-labelledby=, href="#...") to the renamed
elements and point them at the new ids."##,
    },
];

/// Look up explanations by key or by finding id. A finding id may map to several remediations.
pub fn lookup_rule(query: &str) -> Vec<&'static RuleExplanation> {
    let normalized = query.trim().to_lowercase().replace('_', "-");

    if let Some(rule) = RULE_REGISTRY.iter().find(|r| r.key == normalized) {
        return vec![rule];
    }

    let mut out: Vec<&'static RuleExplanation> = Vec::new();
    for entry in entries_for(&normalized) {
        if let Some(rule) = RULE_REGISTRY.iter().find(|r| r.remediation == entry.remediation)
            && !out.iter().any(|r| r.key == rule.key)
        {
            out.push(rule);
        }
    }
    out
}

/// Look up a baseline rule by the fix type it records.
pub fn lookup_baseline(query: &str) -> Option<Baseline> {
    let normalized = query.trim().to_lowercase().replace('_', "-");
    Baseline::ORDER.into_iter().find(|b| b.fix_type() == normalized)
}

/// Finding ids that trigger `remediation`, in catalog order.
pub fn triggers(remediation: Remediation) -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::new();
    for entry in CATALOG.iter().filter(|e| e.remediation == remediation) {
        if !ids.contains(&entry.finding_id) {
            ids.push(entry.finding_id);
        }
    }
    ids
}

pub fn format_scope(scope: Scope) -> &'static str {
    match scope {
        Scope::PerMatch => "per-match",
        Scope::Document => "document",
    }
}

fn title_and_scope(remediation: Remediation) -> (&'static str, Scope) {
    CATALOG
        .iter()
        .find(|e| e.remediation == remediation)
        .map(|e| (e.title, e.scope))
        .unwrap_or(("", Scope::Document))
}

const BANNER: &str = "================================================================================";
const UNDERLINE: &str = "--------------------------------------------------------------------------------";

fn section(out: &mut String, heading: &str, body: &str) {
    out.push_str(&format!("{heading}\n{UNDERLINE}\n{body}\n\n"));
}

/// Full text shown by `a11yfix explain`.
pub fn render_explanation(rule: &RuleExplanation) -> String {
    let (title, scope) = title_and_scope(rule.remediation);
    let mut out = String::new();
    out.push_str(&format!("{BANNER}\nRULE: {title}\n{BANNER}\n\n"));
    out.push_str(&format!("Key:          {}\n", rule.key));
    out.push_str(&format!("Finding ids:  {}\n", triggers(rule.remediation).join(", ")));
    out.push_str(&format!("Scope:        {}\n\n", format_scope(scope)));

    section(&mut out, "DESCRIPTION", rule.description);
    section(&mut out, "AUTOMATIC CHANGE", rule.remediation.mutation());
    section(&mut out, "LEFT ALONE WHEN", rule.remediation.post_condition());
    section(&mut out, "RATIONALE", rule.rationale);
    section(&mut out, "REMEDIATION GUIDANCE", rule.guidance);
    out
}

pub fn render_baseline(baseline: Baseline) -> String {
    let mut out = String::new();
    out.push_str(&format!("{BANNER}\nBASELINE: {}\n{BANNER}\n\n", baseline.fix_type()));
    section(
        &mut out,
        "GUARANTEE",
        &format!(
            "{}\n\nBaseline rules run on every fixing pass, before any finding is looked at.",
            baseline.guarantee()
        ),
    );
    out
}

/// Keys and finding ids accepted by `explain`, for error messages.
pub fn known_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = RULE_REGISTRY.iter().map(|r| r.key).collect();
    for id in supported_ids() {
        if !names.contains(&id) {
            names.push(id);
        }
    }
    names
}

//! Static content served while the store is unreachable.

use crate::schema::{Legal, LegalSlug, Plan, PlanCode};

fn plan(code: PlanCode, name: &str, monthly_price: f64, yearly_price: f64) -> Plan {
    Plan {
        code,
        name: name.to_string(),
        monthly_price,
        yearly_price,
        currency: "USD".to_string(),
        features: Vec::new(),
    }
}

pub fn plans() -> Vec<Plan> {
    vec![
        plan(PlanCode::Free, "Free", 0.0, 0.0),
        plan(PlanCode::Starter, "Starter", 19.0, 180.0),
        plan(PlanCode::Pro, "Pro", 49.0, 468.0),
    ]
}

/// The built-in page for `slug`, or `None` for an unknown slug.
pub fn legal_page(slug: &str) -> Option<Legal> {
    let slug = LegalSlug::from_slug(slug)?;
    let (title, content) = match slug {
        LegalSlug::Terms => ("Terms of Service", "<p>Terms...</p>"),
        LegalSlug::Privacy => ("Privacy Policy", "<p>Privacy...</p>"),
        LegalSlug::ResponsibleBetting => ("Responsible Betting", "<p>Play responsibly.</p>"),
    };

    Some(Legal {
        slug,
        title: title.to_string(),
        content: content.to_string(),
        updated_at: None,
    })
}

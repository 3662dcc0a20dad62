//! Persona and industry catalog
//!
//! Static lookup tables that seed a practice session. Everything here is
//! deterministic: the same persona/industry pair always yields the same
//! opening turns.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// A prospect the trainee can practice against
#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    /// Catalog identifier (e.g. "cfo")
    pub id: &'static str,
    /// Prospect's name
    pub name: &'static str,
    /// Job title
    pub title: &'static str,
    /// How the prospect tends to behave on a call
    pub disposition: &'static str,
    /// First line the prospect says when the call connects
    pub greeting: &'static str,
}

/// Business context for a practice session
#[derive(Debug, Clone, Serialize)]
pub struct Industry {
    /// Catalog identifier (e.g. "healthcare")
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Company the prospect works for
    pub company: &'static str,
    /// Pains the trainee should uncover
    pub pain_points: &'static str,
}

static PERSONAS: &[Persona] = &[
    Persona {
        id: "cfo",
        name: "Dana Whitfield",
        title: "Chief Financial Officer",
        disposition: "numbers-driven, skeptical of soft benefits, short on time",
        greeting: "I've got about ten minutes. What's this about?",
    },
    Persona {
        id: "operations-manager",
        name: "Marco Reyes",
        title: "Operations Manager",
        disposition: "practical, worried about disruption to the team, open if you listen",
        greeting: "Hi, yeah, I saw your email. We're pretty slammed this week though.",
    },
    Persona {
        id: "it-director",
        name: "Priya Natarajan",
        title: "Director of IT",
        disposition: "detail-oriented, cautious about integrations and security reviews",
        greeting: "Thanks for calling. Before we start, I should say we're not really shopping for new tools.",
    },
    Persona {
        id: "procurement-lead",
        name: "Tom Gallagher",
        title: "Procurement Lead",
        disposition: "price-focused, compares vendors side by side, pushes back on terms",
        greeting: "Okay, I'm here. Just so you know, I talk to a lot of vendors.",
    },
];

static INDUSTRIES: &[Industry] = &[
    Industry {
        id: "healthcare",
        label: "Healthcare",
        company: "Riverside Regional Health",
        pain_points: "staff burnout, manual scheduling, and audit preparation eating clinician time",
    },
    Industry {
        id: "manufacturing",
        label: "Manufacturing",
        company: "Northgate Components",
        pain_points: "unplanned line downtime, scrap rates, and spreadsheets tracking maintenance",
    },
    Industry {
        id: "logistics",
        label: "Logistics",
        company: "Bluewater Freight",
        pain_points: "late deliveries, driver turnover, and poor visibility into shipment status",
    },
    Industry {
        id: "retail",
        label: "Retail",
        company: "Harbor & Finch Stores",
        pain_points: "stockouts on fast movers, shrinking margins, and inconsistent store reporting",
    },
];

static PERSONA_INDEX: Lazy<HashMap<&'static str, &'static Persona>> =
    Lazy::new(|| PERSONAS.iter().map(|p| (p.id, p)).collect());

static INDUSTRY_INDEX: Lazy<HashMap<&'static str, &'static Industry>> =
    Lazy::new(|| INDUSTRIES.iter().map(|i| (i.id, i)).collect());

/// All personas in display order
pub fn personas() -> &'static [Persona] {
    PERSONAS
}

/// All industries in display order
pub fn industries() -> &'static [Industry] {
    INDUSTRIES
}

/// Look up a persona by id (case-insensitive, surrounding whitespace ignored)
pub fn find_persona(id: &str) -> Option<&'static Persona> {
    PERSONA_INDEX
        .get(id.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Look up an industry by id (case-insensitive, surrounding whitespace ignored)
pub fn find_industry(id: &str) -> Option<&'static Industry> {
    INDUSTRY_INDEX
        .get(id.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Coach briefing that opens every session
pub fn coach_briefing(persona: &Persona, industry: &Industry) -> String {
    format!(
        "You're calling {name}, {title} at {company} ({label}). \
         {name} is {disposition}. Likely pains: {pains}. \
         Work through SOLVE: Spot the pain, Outline the outcome, Limit the risk, \
         present the Value pack, and Execute a clear call-to-action.",
        name = persona.name,
        title = persona.title,
        company = industry.company,
        label = industry.label,
        disposition = persona.disposition,
        pains = industry.pain_points,
    )
}

/// The prospect's first line
pub fn prospect_opening(persona: &Persona, industry: &Industry) -> String {
    format!(
        "{} here, {} at {}. {}",
        persona.name, persona.title, industry.company, persona.greeting
    )
}

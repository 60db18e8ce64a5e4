//! Recognizer rule tables, one ordered list per entity type.
//!
//! A recognizer is a tagged predicate that decides whether a raw header
//! denotes one domain concept. Order inside each table is significant:
//! qualified concepts (e.g. "association name") come before generic ones
//! (e.g. bare "name") so a broad substring never shadows a specific
//! match. The tables are plain data so precedence is visible and each
//! predicate is testable in isolation.

use hoa_model::EntityType;

use crate::utils::{has_any_word, has_word, normalize_header};

/// A predicate over a normalized header, tagged with the concept it
/// recognizes and the canonical field it proposes.
pub struct Recognizer {
    /// Concept name, for diagnostics and mapping-preview output.
    pub concept: &'static str,
    /// Canonical target field proposed on a match.
    pub target: &'static str,
    matches: fn(&str) -> bool,
}

impl Recognizer {
    /// Test a raw header. Never panics; blank headers match nothing.
    pub fn test(&self, raw_header: &str) -> bool {
        let normalized = normalize_header(raw_header);
        if normalized.is_empty() {
            return false;
        }
        (self.matches)(&normalized)
    }
}

const fn recognizer(
    concept: &'static str,
    target: &'static str,
    matches: fn(&str) -> bool,
) -> Recognizer {
    Recognizer {
        concept,
        target,
        matches,
    }
}

/// The ordered recognizer table for an entity type.
pub fn recognizers_for(entity: EntityType) -> &'static [Recognizer] {
    match entity {
        EntityType::Association => ASSOCIATION_RECOGNIZERS,
        EntityType::Property => PROPERTY_RECOGNIZERS,
        EntityType::Resident => RESIDENT_RECOGNIZERS,
        EntityType::Vendor => VENDOR_RECOGNIZERS,
    }
}

static ASSOCIATION_RECOGNIZERS: &[Recognizer] = &[
    recognizer("association-name", "association_name", association_name),
    recognizer("association-tax-id", "tax_id", tax_id),
    recognizer(
        "financial-fiscal-year-start",
        "fiscal_year_start",
        fiscal_year_start,
    ),
    recognizer("association-units-count", "units_count", units_count),
    recognizer("association-email", "email", email),
    recognizer("association-phone", "phone", phone),
    recognizer("address-street", "street_address", street_address),
    recognizer("address-city", "city", city),
    recognizer("address-state", "state", state),
    recognizer("address-zip", "zip", zip),
];

static PROPERTY_RECOGNIZERS: &[Recognizer] = &[
    recognizer(
        "association-name",
        "association_name",
        parent_association_name,
    ),
    recognizer("property-year-built", "year_built", year_built),
    recognizer("property-square-feet", "square_feet", square_feet),
    recognizer("property-type", "property_type", property_type),
    recognizer("unit-bedrooms", "bedrooms", bedrooms),
    recognizer("unit-bathrooms", "bathrooms", bathrooms),
    recognizer("unit-number", "unit_number", unit_number),
    recognizer("address-street", "street_address", street_address),
    recognizer("address-city", "city", city),
    recognizer("address-state", "state", state),
    recognizer("address-zip", "zip", zip),
];

static RESIDENT_RECOGNIZERS: &[Recognizer] = &[
    recognizer("person-first-name", "first_name", first_name),
    recognizer("person-last-name", "last_name", last_name),
    recognizer("resident-move-in-date", "move_in_date", move_in_date),
    recognizer("resident-type", "resident_type", resident_type),
    recognizer("financial-balance", "balance", balance),
    recognizer("unit-number", "unit_number", unit_number),
    recognizer("person-email", "email", email),
    recognizer("person-phone", "phone", phone),
    recognizer("address-street", "street_address", street_address),
];

static VENDOR_RECOGNIZERS: &[Recognizer] = &[
    recognizer("vendor-company-name", "company_name", company_name),
    recognizer("vendor-contact-name", "contact_name", contact_name),
    recognizer(
        "vendor-service-category",
        "service_category",
        service_category,
    ),
    recognizer("vendor-tax-id", "tax_id", tax_id),
    recognizer("vendor-email", "email", email),
    recognizer("vendor-phone", "phone", phone),
    recognizer("address-street", "street_address", street_address),
    recognizer("address-city", "city", city),
    recognizer("address-state", "state", state),
    recognizer("address-zip", "zip", zip),
];

// Association identity

fn association_name(h: &str) -> bool {
    let community = has_any_word(h, &["association", "assoc", "hoa", "community"]);
    (community && has_word(h, "name")) || h == "association" || h == "hoa"
}

fn parent_association_name(h: &str) -> bool {
    has_any_word(h, &["association", "assoc", "hoa", "community"])
}

fn tax_id(h: &str) -> bool {
    has_any_word(h, &["tax", "ein", "1099"])
}

// Financial terms

fn fiscal_year_start(h: &str) -> bool {
    has_word(h, "fiscal") || h.contains("fy start")
}

fn balance(h: &str) -> bool {
    has_any_word(h, &["balance", "owed"]) || h.contains("amount due")
}

// Property attributes

fn year_built(h: &str) -> bool {
    (has_any_word(h, &["year", "yr"]) && has_word(h, "built")) || h == "built"
}

fn square_feet(h: &str) -> bool {
    has_any_word(h, &["sqft", "sf"]) || (h.contains("square") || has_word(h, "sq"))
}

fn property_type(h: &str) -> bool {
    has_word(h, "type") && !has_word(h, "resident")
}

fn units_count(h: &str) -> bool {
    has_word(h, "units") || (has_word(h, "unit") && has_any_word(h, &["count", "number", "total"]))
}

// Unit attributes

fn unit_number(h: &str) -> bool {
    (has_any_word(h, &["unit", "lot", "apt", "apartment"]) && !has_word(h, "units"))
        || h == "unit no"
}

fn bedrooms(h: &str) -> bool {
    has_any_word(h, &["bedrooms", "bedroom", "beds", "br"])
}

fn bathrooms(h: &str) -> bool {
    has_any_word(h, &["bathrooms", "bathroom", "baths", "ba"])
}

// Person identity

fn first_name(h: &str) -> bool {
    has_word(h, "first") || has_word(h, "given") || h == "fname"
}

fn last_name(h: &str) -> bool {
    has_any_word(h, &["last", "surname", "family"]) || h == "lname"
}

fn resident_type(h: &str) -> bool {
    // "Owner/Tenant" normalizes to "ownertenant", so substring checks.
    has_word(h, "type") || h.contains("owner") || h.contains("tenant")
}

fn move_in_date(h: &str) -> bool {
    has_word(h, "move") || h.contains("movein")
}

// Vendor identity

fn company_name(h: &str) -> bool {
    has_any_word(h, &["company", "vendor", "business"])
        && !has_word(h, "contact")
}

fn contact_name(h: &str) -> bool {
    has_word(h, "contact") && !has_any_word(h, &["phone", "email"])
}

fn service_category(h: &str) -> bool {
    has_any_word(h, &["service", "category", "trade", "specialty"])
}

// Contact

fn email(h: &str) -> bool {
    has_word(h, "email") || h.contains("e-mail") || h.contains("e mail")
}

fn phone(h: &str) -> bool {
    has_any_word(h, &["phone", "telephone", "tel", "mobile", "cell"])
}

// Address components

fn street_address(h: &str) -> bool {
    (has_any_word(h, &["street", "address", "addr"]) && !email(h)) || h.contains("address line")
}

fn city(h: &str) -> bool {
    has_any_word(h, &["city", "town", "municipality"])
}

fn state(h: &str) -> bool {
    has_word(h, "state") || has_word(h, "province") || h == "st"
}

fn zip(h: &str) -> bool {
    has_any_word(h, &["zip", "zipcode", "postal", "postcode"])
}

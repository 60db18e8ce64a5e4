//! Per-entity catalogs of canonical target fields.
//!
//! Each entity type has a fixed, immutable catalog describing the fields
//! uploaded columns can be mapped onto. Catalogs are built once and are
//! safe to share across concurrent import sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::EntityType;

/// Sentinel target meaning "drop this column on import".
pub const IGNORE_FIELD: &str = "ignore";

/// Broad grouping of a canonical field, used for display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Identity,
    Contact,
    Address,
    Attributes,
    Financial,
}

impl FieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Identity => "Identity",
            FieldCategory::Contact => "Contact",
            FieldCategory::Address => "Address",
            FieldCategory::Attributes => "Attributes",
            FieldCategory::Financial => "Financial",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One canonical target field an uploaded column can map onto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOption {
    /// Canonical field name (snake_case).
    pub name: String,
    /// Human-readable label shown in the mapping editor.
    pub label: String,
    /// True if a source column must be mapped to this field.
    pub required: bool,
    pub category: FieldCategory,
    pub description: String,
}

/// The full set of canonical fields for one entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub entity: EntityType,
    pub fields: Vec<FieldOption>,
}

impl FieldCatalog {
    /// Build the static catalog for an entity type.
    pub fn for_entity(entity: EntityType) -> Self {
        let fields = match entity {
            EntityType::Association => association_fields(),
            EntityType::Property => property_fields(),
            EntityType::Resident => resident_fields(),
            EntityType::Vendor => vendor_fields(),
        };
        Self { entity, fields }
    }

    /// Look up a field by canonical name (case-insensitive).
    pub fn field(&self, name: &str) -> Option<&FieldOption> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// True if `name` is a canonical field of this catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The fields that must be covered by a mapping.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldOption> {
        self.fields.iter().filter(|field| field.required)
    }
}

fn field(
    name: &str,
    label: &str,
    required: bool,
    category: FieldCategory,
    description: &str,
) -> FieldOption {
    FieldOption {
        name: name.to_string(),
        label: label.to_string(),
        required,
        category,
        description: description.to_string(),
    }
}

fn association_fields() -> Vec<FieldOption> {
    vec![
        field(
            "association_name",
            "Association Name",
            true,
            FieldCategory::Identity,
            "Legal name of the association",
        ),
        field(
            "tax_id",
            "Tax ID",
            false,
            FieldCategory::Identity,
            "Federal tax identification number (EIN)",
        ),
        field(
            "email",
            "Email",
            false,
            FieldCategory::Contact,
            "Primary contact email for the association",
        ),
        field(
            "phone",
            "Phone",
            false,
            FieldCategory::Contact,
            "Primary contact phone number",
        ),
        field(
            "street_address",
            "Street Address",
            false,
            FieldCategory::Address,
            "Mailing street address",
        ),
        field("city", "City", true, FieldCategory::Address, "Mailing city"),
        field(
            "state",
            "State",
            true,
            FieldCategory::Address,
            "Two-letter state code",
        ),
        field(
            "zip",
            "ZIP Code",
            false,
            FieldCategory::Address,
            "Postal code",
        ),
        field(
            "units_count",
            "Number of Units",
            false,
            FieldCategory::Attributes,
            "Total units in the community",
        ),
        field(
            "fiscal_year_start",
            "Fiscal Year Start",
            false,
            FieldCategory::Financial,
            "First day of the association's fiscal year",
        ),
    ]
}

fn property_fields() -> Vec<FieldOption> {
    vec![
        field(
            "association_name",
            "Association Name",
            true,
            FieldCategory::Identity,
            "Name of the parent association",
        ),
        field(
            "street_address",
            "Street Address",
            true,
            FieldCategory::Address,
            "Street address of the property",
        ),
        field(
            "unit_number",
            "Unit Number",
            false,
            FieldCategory::Attributes,
            "Unit or lot identifier within the property",
        ),
        field("city", "City", false, FieldCategory::Address, "City"),
        field(
            "state",
            "State",
            false,
            FieldCategory::Address,
            "Two-letter state code",
        ),
        field("zip", "ZIP Code", false, FieldCategory::Address, "Postal code"),
        field(
            "property_type",
            "Property Type",
            false,
            FieldCategory::Attributes,
            "Condo, townhome, single family, etc.",
        ),
        field(
            "year_built",
            "Year Built",
            false,
            FieldCategory::Attributes,
            "Construction year",
        ),
        field(
            "square_feet",
            "Square Feet",
            false,
            FieldCategory::Attributes,
            "Interior square footage",
        ),
        field(
            "bedrooms",
            "Bedrooms",
            false,
            FieldCategory::Attributes,
            "Number of bedrooms",
        ),
        field(
            "bathrooms",
            "Bathrooms",
            false,
            FieldCategory::Attributes,
            "Number of bathrooms",
        ),
    ]
}

fn resident_fields() -> Vec<FieldOption> {
    vec![
        field(
            "first_name",
            "First Name",
            true,
            FieldCategory::Identity,
            "Resident's given name",
        ),
        field(
            "last_name",
            "Last Name",
            true,
            FieldCategory::Identity,
            "Resident's family name",
        ),
        field(
            "email",
            "Email",
            true,
            FieldCategory::Contact,
            "Resident's email address",
        ),
        field(
            "phone",
            "Phone",
            false,
            FieldCategory::Contact,
            "Resident's phone number",
        ),
        field(
            "street_address",
            "Street Address",
            false,
            FieldCategory::Address,
            "Street address of the resident's unit",
        ),
        field(
            "unit_number",
            "Unit Number",
            false,
            FieldCategory::Attributes,
            "Unit the resident occupies",
        ),
        field(
            "resident_type",
            "Resident Type",
            false,
            FieldCategory::Attributes,
            "Owner or tenant",
        ),
        field(
            "move_in_date",
            "Move-in Date",
            false,
            FieldCategory::Attributes,
            "Date the resident moved in",
        ),
        field(
            "balance",
            "Balance",
            false,
            FieldCategory::Financial,
            "Outstanding account balance",
        ),
    ]
}

fn vendor_fields() -> Vec<FieldOption> {
    vec![
        field(
            "company_name",
            "Company Name",
            true,
            FieldCategory::Identity,
            "Vendor's business name",
        ),
        field(
            "contact_name",
            "Contact Name",
            false,
            FieldCategory::Identity,
            "Primary contact person",
        ),
        field(
            "email",
            "Email",
            false,
            FieldCategory::Contact,
            "Vendor contact email",
        ),
        field(
            "phone",
            "Phone",
            true,
            FieldCategory::Contact,
            "Vendor contact phone number",
        ),
        field(
            "service_category",
            "Service Category",
            false,
            FieldCategory::Attributes,
            "Landscaping, plumbing, electrical, etc.",
        ),
        field(
            "street_address",
            "Street Address",
            false,
            FieldCategory::Address,
            "Business street address",
        ),
        field("city", "City", false, FieldCategory::Address, "City"),
        field(
            "state",
            "State",
            false,
            FieldCategory::Address,
            "Two-letter state code",
        ),
        field("zip", "ZIP Code", false, FieldCategory::Address, "Postal code"),
        field(
            "tax_id",
            "Tax ID",
            false,
            FieldCategory::Financial,
            "Tax identification number for 1099 reporting",
        ),
    ]
}

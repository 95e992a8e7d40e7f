//! Rental terms and the persisted agreement record

use std::fmt;

/// One of the ten fields extracted from a rental agreement
///
/// Every field has two names: the key the model uses in its JSON output and
/// the attribute name used by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermField {
    /// Shortened agreement title
    Title,
    /// Owner (landlord) of the rental unit
    OwnerName,
    /// Tenant of the rental unit
    TenantName,
    /// First day of the tenancy
    TenancyStartDate,
    /// Last day of the tenancy
    TenancyEndDate,
    /// Monthly rent as a plain number
    MonthlyRent,
    /// Security deposit as a plain number
    Deposit,
    /// Who pays utilities
    UtilityTerms,
    /// Who pays property tax and association fees
    PropertyTaxAndHoa,
    /// How the agreement may be terminated
    RentalTerminationTerms,
}

impl TermField {
    /// All fields, in output-format order
    pub const ALL: [TermField; 10] = [
        TermField::Title,
        TermField::OwnerName,
        TermField::TenantName,
        TermField::TenancyStartDate,
        TermField::TenancyEndDate,
        TermField::MonthlyRent,
        TermField::Deposit,
        TermField::UtilityTerms,
        TermField::PropertyTaxAndHoa,
        TermField::RentalTerminationTerms,
    ];

    /// Key used in the model's JSON output
    pub fn json_key(&self) -> &'static str {
        match self {
            TermField::Title => "Rental Agreement Title",
            TermField::OwnerName => "Owner Name",
            TermField::TenantName => "Tenant Name",
            TermField::TenancyStartDate => "Tenancy Start Date",
            TermField::TenancyEndDate => "Tenancy End Date",
            TermField::MonthlyRent => "Monthly Rent",
            TermField::Deposit => "Deposit",
            TermField::UtilityTerms => "Utility Terms",
            TermField::PropertyTaxAndHoa => "Property Tax and HOA",
            TermField::RentalTerminationTerms => "Rental Termination Terms",
        }
    }

    /// Attribute name used by the record store
    pub fn attribute(&self) -> &'static str {
        match self {
            TermField::Title => "agreement_title",
            TermField::OwnerName => "owner_name",
            TermField::TenantName => "tenant_name",
            TermField::TenancyStartDate => "tenancy_start_date",
            TermField::TenancyEndDate => "tenancy_end_date",
            TermField::MonthlyRent => "monthly_rent",
            TermField::Deposit => "deposit",
            TermField::UtilityTerms => "utility_terms",
            TermField::PropertyTaxAndHoa => "property_tax_and_hoa",
            TermField::RentalTerminationTerms => "rental_termination_terms",
        }
    }
}

impl fmt::Display for TermField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

/// The ten terms extracted from a single rental agreement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalTerms {
    /// Agreement title, six words or less
    pub agreement_title: String,
    /// Owner's name
    pub owner_name: String,
    /// Tenant's name
    pub tenant_name: String,
    /// Start date (mm/dd/yyyy)
    pub tenancy_start_date: String,
    /// End date (mm/dd/yyyy)
    pub tenancy_end_date: String,
    /// Monthly rent
    pub monthly_rent: String,
    /// Deposit amount
    pub deposit: String,
    /// Utility payment terms
    pub utility_terms: String,
    /// Property tax and HOA terms
    pub property_tax_and_hoa: String,
    /// Termination terms
    pub rental_termination_terms: String,
}

impl RentalTerms {
    /// Read a field by name
    pub fn get(&self, field: TermField) -> &str {
        match field {
            TermField::Title => &self.agreement_title,
            TermField::OwnerName => &self.owner_name,
            TermField::TenantName => &self.tenant_name,
            TermField::TenancyStartDate => &self.tenancy_start_date,
            TermField::TenancyEndDate => &self.tenancy_end_date,
            TermField::MonthlyRent => &self.monthly_rent,
            TermField::Deposit => &self.deposit,
            TermField::UtilityTerms => &self.utility_terms,
            TermField::PropertyTaxAndHoa => &self.property_tax_and_hoa,
            TermField::RentalTerminationTerms => &self.rental_termination_terms,
        }
    }

    /// Overwrite a field by name
    pub fn set(&mut self, field: TermField, value: impl Into<String>) {
        let slot = match field {
            TermField::Title => &mut self.agreement_title,
            TermField::OwnerName => &mut self.owner_name,
            TermField::TenantName => &mut self.tenant_name,
            TermField::TenancyStartDate => &mut self.tenancy_start_date,
            TermField::TenancyEndDate => &mut self.tenancy_end_date,
            TermField::MonthlyRent => &mut self.monthly_rent,
            TermField::Deposit => &mut self.deposit,
            TermField::UtilityTerms => &mut self.utility_terms,
            TermField::PropertyTaxAndHoa => &mut self.property_tax_and_hoa,
            TermField::RentalTerminationTerms => &mut self.rental_termination_terms,
        };
        *slot = value.into();
    }

    /// Iterate over all fields with their values, in output-format order
    pub fn iter(&self) -> impl Iterator<Item = (TermField, &str)> + '_ {
        TermField::ALL.iter().map(move |field| (*field, self.get(*field)))
    }
}

/// Rental terms persisted under the source document's identity
///
/// Records are written by upsert: a second write with the same
/// `agreement_id` replaces the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementRecord {
    /// Document path the terms were extracted from
    pub agreement_id: String,

    /// Extracted terms
    pub terms: RentalTerms,
}

impl AgreementRecord {
    /// Create a new record
    pub fn new(agreement_id: impl Into<String>, terms: RentalTerms) -> Self {
        Self {
            agreement_id: agreement_id.into(),
            terms,
        }
    }
}

use std::fmt;

/// The six recognized input columns
///
/// Every rule in the validator is a `match` over this enum, so adding a
/// column is a compile error until each rule handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    UserName,
    Age,
    Height,
    Gender,
    SaleAmount,
    LastPurchaseDate,
}

impl Field {
    /// All fields, in the order constraint checks run
    pub const ALL: [Field; 6] = [
        Field::UserName,
        Field::Age,
        Field::Height,
        Field::Gender,
        Field::SaleAmount,
        Field::LastPurchaseDate,
    ];

    /// Canonical column name
    pub fn name(self) -> &'static str {
        match self {
            Self::UserName => "USER_NAME",
            Self::Age => "AGE",
            Self::Height => "HEIGHT",
            Self::Gender => "GENDER",
            Self::SaleAmount => "SALE_AMOUNT",
            Self::LastPurchaseDate => "LAST_PURCHASE_DATE",
        }
    }

    /// Case-insensitive lookup of a column name
    pub fn lookup(key: &str) -> Option<Field> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(key))
    }

    /// Domain constraint text reported when the field is absent or out of range
    pub fn constraint(self) -> &'static str {
        match self {
            Self::UserName => "must be non empty",
            Self::Age | Self::Height | Self::SaleAmount => "must be > 0",
            Self::Gender => "must be one of \"M\" or \"F\" case insensitive",
            Self::LastPurchaseDate => "must be non null",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

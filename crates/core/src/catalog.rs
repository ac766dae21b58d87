//! Category and subcategory tables for the Vitibrasil data source.
//!
//! The tables are static and read-only. Each [`Category`] maps to the
//! upstream `opcao` selector code, and categories that support a secondary
//! filter own a table of subcategory names to `subopcao` codes.
//!
//! # Example
//!
//! ```rust
//! use vitis_core::Category;
//!
//! let category: Category = "processing".parse().unwrap();
//! assert_eq!(category.code(), "opt_03");
//! assert_eq!(category.subcategory_code("viniferas"), Some("10"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::VitisError;

/// Top-level data domain offered by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Production,
    Processing,
    Commercialization,
    Import,
    Export,
}

const PROCESSING_SUBCATEGORIES: &[(&str, &str)] = &[
    ("viniferas", "10"),
    ("americanas_hibridas", "11"),
    ("uvas_mesa", "12"),
    ("sem_classificacao", "13"),
];

const IMPORT_SUBCATEGORIES: &[(&str, &str)] = &[
    ("vinhos", "10"),
    ("espumantes", "11"),
    ("uvas_frescas", "12"),
    ("uvas_passas", "13"),
    ("suco_uva", "14"),
];

const EXPORT_SUBCATEGORIES: &[(&str, &str)] = &[
    ("vinhos", "10"),
    ("espumantes", "11"),
    ("uvas_frescas", "12"),
    ("suco_uva", "13"),
];

impl Category {
    /// Every category, in upstream menu order.
    pub const ALL: [Category; 5] = [
        Category::Production,
        Category::Processing,
        Category::Commercialization,
        Category::Import,
        Category::Export,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Production => "production",
            Category::Processing => "processing",
            Category::Commercialization => "commercialization",
            Category::Import => "import",
            Category::Export => "export",
        }
    }

    /// Upstream `opcao` selector code.
    pub fn code(self) -> &'static str {
        match self {
            Category::Production => "opt_02",
            Category::Processing => "opt_03",
            Category::Commercialization => "opt_04",
            Category::Import => "opt_05",
            Category::Export => "opt_06",
        }
    }

    /// Subcategory table owned by this category; empty when it has none.
    pub fn subcategories(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Processing => PROCESSING_SUBCATEGORIES,
            Category::Import => IMPORT_SUBCATEGORIES,
            Category::Export => EXPORT_SUBCATEGORIES,
            Category::Production | Category::Commercialization => &[],
        }
    }

    /// Looks up the `subopcao` code for a subcategory of this category.
    ///
    /// Returns `None` for names the category does not define, including
    /// every name on categories without a subcategory table.
    pub fn subcategory_code(self, subcategory: &str) -> Option<&'static str> {
        self.subcategories()
            .iter()
            .find(|(name, _)| *name == subcategory)
            .map(|(_, code)| *code)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = VitisError;

    /// Parses a canonical name or the data source's Portuguese alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" | "producao" => Ok(Category::Production),
            "processing" | "processamento" => Ok(Category::Processing),
            "commercialization" | "comercializacao" => Ok(Category::Commercialization),
            "import" | "importacao" => Ok(Category::Import),
            "export" | "exportacao" => Ok(Category::Export),
            _ => Err(VitisError::InvalidSelection(s.to_string())),
        }
    }
}

/// Discovery view of the tables, for callers building selection menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Every category name.
    pub categories: Vec<&'static str>,
    /// Category name to its subcategory names, for categories that have any.
    pub subcategories: BTreeMap<&'static str, Vec<&'static str>>,
}

/// Builds the nested category → subcategory-names mapping.
pub fn catalog() -> Catalog {
    let categories = Category::ALL.iter().map(|c| c.name()).collect();
    let subcategories = Category::ALL
        .iter()
        .filter(|c| !c.subcategories().is_empty())
        .map(|c| (c.name(), c.subcategories().iter().map(|(name, _)| *name).collect()))
        .collect();

    Catalog { categories, subcategories }
}

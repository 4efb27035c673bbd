//! Module and phase configuration
//!
//! The catalog is static: loaded once at startup (built-in GAqP layout or a
//! TOML override) and never changed for the lifetime of the process.
//!
//! # TOML layout
//!
//! ```toml
//! [[modules]]
//! id = "pond-water"
//! name = "Pond & Water Care"
//! description = "Maintain optimal water conditions for healthy shrimp"
//! categories = ["Water Management", "Pond Management"]
//!
//! [[phases]]
//! id = 1
//! name = "Foundation & Site Security"
//! categories = ["Infrastructure", "Access Control"]
//!
//! [aspects]
//! "Pond & Water Care" = "pond-water"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::{PlanError, PlanResult};

/// Selection id meaning "every task, unfiltered"
pub const ALL_SELECTION: &str = "all";

/// A set of task categories that progress is computed over
pub trait Grouping {
    fn label(&self) -> String;
    fn categories(&self) -> &[String];

    fn covers(&self, category: &str) -> bool {
        self.categories().iter().any(|c| c == category)
    }
}

/// One certification competency (e.g. "Pond & Water Care")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<String>,
}

impl Grouping for Module {
    fn label(&self) -> String {
        format!("module '{}'", self.id)
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// One delivery stage, ordered by `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<String>,
}

impl Grouping for Phase {
    fn label(&self) -> String {
        format!("phase {}", self.id)
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// The fixed category vocabulary
///
/// Category labels arrive as free text. Lookups through this enum fail
/// closed: anything unrecognized maps to `None` and callers fall back to a
/// generic rendering instead of dropping the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Infrastructure,
    AccessControl,
    WaterManagement,
    PondManagement,
    AnimalHealth,
    FeedManagement,
    HumanResources,
    EquipmentManagement,
    WasteManagement,
}

impl KnownCategory {
    pub const ALL: [KnownCategory; 9] = [
        KnownCategory::Infrastructure,
        KnownCategory::AccessControl,
        KnownCategory::WaterManagement,
        KnownCategory::PondManagement,
        KnownCategory::AnimalHealth,
        KnownCategory::FeedManagement,
        KnownCategory::HumanResources,
        KnownCategory::EquipmentManagement,
        KnownCategory::WasteManagement,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KnownCategory::Infrastructure => "Infrastructure",
            KnownCategory::AccessControl => "Access Control",
            KnownCategory::WaterManagement => "Water Management",
            KnownCategory::PondManagement => "Pond Management",
            KnownCategory::AnimalHealth => "Animal Health",
            KnownCategory::FeedManagement => "Feed Management",
            KnownCategory::HumanResources => "Human Resources",
            KnownCategory::EquipmentManagement => "Equipment Management",
            KnownCategory::WasteManagement => "Waste Management",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for KnownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the host asked to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    All,
    Module(&'a Module),
    Phase(&'a Phase),
}

impl Selection<'_> {
    pub fn id(&self) -> String {
        match self {
            Selection::All => ALL_SELECTION.to_string(),
            Selection::Module(m) => m.id.clone(),
            Selection::Phase(p) => format!("phase-{}", p.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Selection::All => "All Modules",
            Selection::Module(m) => &m.name,
            Selection::Phase(p) => &p.name,
        }
    }

    /// Whether a task with this category belongs to the selection
    pub fn includes(&self, category: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Module(m) => m.covers(category),
            Selection::Phase(p) => p.covers(category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    modules: Vec<Module>,
    #[serde(default)]
    phases: Vec<Phase>,
    /// Legacy aspect name → module id
    #[serde(default)]
    aspects: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::gaqp()
    }
}

impl Catalog {
    /// Build a catalog, sorting phases by id and checking ids
    pub fn new(
        modules: Vec<Module>,
        mut phases: Vec<Phase>,
        aspects: BTreeMap<String, String>,
    ) -> PlanResult<Self> {
        let mut seen = HashSet::new();
        for module in &modules {
            if module.id == ALL_SELECTION {
                return Err(PlanError::InvalidCatalog(format!(
                    "module id '{}' is reserved",
                    ALL_SELECTION
                )));
            }
            if !seen.insert(module.id.as_str()) {
                return Err(PlanError::InvalidCatalog(format!(
                    "duplicate module id '{}'",
                    module.id
                )));
            }
        }

        let mut phase_ids = HashSet::new();
        for phase in &phases {
            if !phase_ids.insert(phase.id) {
                return Err(PlanError::InvalidCatalog(format!(
                    "duplicate phase id {}",
                    phase.id
                )));
            }
        }
        phases.sort_by_key(|p| p.id);

        for (aspect, module_id) in &aspects {
            if !seen.contains(module_id.as_str()) {
                return Err(PlanError::InvalidCatalog(format!(
                    "aspect '{}' points to unknown module '{}'",
                    aspect, module_id
                )));
            }
        }

        Ok(Self {
            modules,
            phases,
            aspects,
        })
    }

    /// Parse a catalog from TOML
    pub fn from_toml_str(content: &str) -> PlanResult<Self> {
        let raw: Catalog =
            toml::from_str(content).map_err(|e| PlanError::InvalidCatalog(e.to_string()))?;
        Self::new(raw.modules, raw.phases, raw.aspects)
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Phases in ascending id order
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn phase(&self, id: u32) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Whether any module or phase places this category
    pub fn places(&self, category: &str) -> bool {
        self.modules.iter().any(|m| m.covers(category))
            || self.phases.iter().any(|p| p.covers(category))
    }

    /// Resolve a selection parameter from the host's navigation state
    ///
    /// Accepts a module id, a phase id (`"2"` or `"phase-2"`), a legacy aspect
    /// name, or `"all"`. Anything unrecognized falls back to [`Selection::All`].
    pub fn select(&self, param: Option<&str>) -> Selection<'_> {
        let Some(param) = param.map(str::trim).filter(|p| !p.is_empty()) else {
            return Selection::All;
        };

        if param == ALL_SELECTION {
            return Selection::All;
        }
        if let Some(module) = self.module(param) {
            return Selection::Module(module);
        }

        let phase_key = param.strip_prefix("phase-").unwrap_or(param);
        if let Ok(id) = phase_key.parse::<u32>()
            && let Some(phase) = self.phase(id)
        {
            return Selection::Phase(phase);
        }

        if let Some(module) = self.aspects.get(param).and_then(|id| self.module(id)) {
            return Selection::Module(module);
        }

        Selection::All
    }

    /// The built-in GAqP journey: five modules, four phases
    pub fn gaqp() -> Self {
        fn cats(list: &[KnownCategory]) -> Vec<String> {
            list.iter().map(|c| c.label().to_string()).collect()
        }
        use KnownCategory::*;

        let modules = vec![
            Module {
                id: "farm-setup".to_string(),
                name: "Farm Setup Basics".to_string(),
                description: "Establish basic farm infrastructure and security foundations"
                    .to_string(),
                categories: cats(&[Infrastructure, AccessControl]),
            },
            Module {
                id: "pond-water".to_string(),
                name: "Pond & Water Care".to_string(),
                description: "Maintain optimal water conditions for healthy shrimp".to_string(),
                categories: cats(&[WaterManagement, PondManagement]),
            },
            Module {
                id: "stock-sourcing".to_string(),
                name: "Healthy Stock Sourcing".to_string(),
                description: "Source and manage healthy shrimp stock".to_string(),
                categories: cats(&[AnimalHealth]),
            },
            Module {
                id: "access-control".to_string(),
                name: "Farm Access Control".to_string(),
                description: "Control farm access and implement biosecurity protocols".to_string(),
                categories: cats(&[HumanResources, AccessControl]),
            },
            Module {
                id: "disease-readiness".to_string(),
                name: "Disease Readiness".to_string(),
                description: "Prepare for and prevent disease outbreaks".to_string(),
                categories: cats(&[EquipmentManagement, WasteManagement, FeedManagement]),
            },
        ];

        let phases = vec![
            Phase {
                id: 1,
                name: "Foundation & Site Security".to_string(),
                description: "Establish basic farm infrastructure and access controls".to_string(),
                categories: cats(&[Infrastructure, AccessControl]),
            },
            Phase {
                id: 2,
                name: "Water & Stock Health".to_string(),
                description: "Ensure optimal water conditions and healthy stock sourcing"
                    .to_string(),
                categories: cats(&[WaterManagement, PondManagement, AnimalHealth]),
            },
            Phase {
                id: 3,
                name: "Daily Farm Operations".to_string(),
                description: "Implement routine management and monitoring practices".to_string(),
                categories: cats(&[FeedManagement, HumanResources]),
            },
            Phase {
                id: 4,
                name: "Advanced Practices & Compliance".to_string(),
                description: "Maintain advanced biosecurity and regulatory compliance".to_string(),
                categories: cats(&[EquipmentManagement, WasteManagement]),
            },
        ];

        let aspects = [
            ("Pond & Water Care", "pond-water"),
            ("Farm Access Control", "access-control"),
            ("Stock Sourcing", "stock-sourcing"),
            ("Feed Management", "disease-readiness"),
            ("Infrastructure & Equipment", "farm-setup"),
            ("Waste Management", "disease-readiness"),
        ]
        .into_iter()
        .map(|(a, m)| (a.to_string(), m.to_string()))
        .collect();

        Self {
            modules,
            phases,
            aspects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaqp_catalog_is_valid() {
        let gaqp = Catalog::gaqp();
        let rebuilt = Catalog::new(
            gaqp.modules.clone(),
            gaqp.phases.clone(),
            gaqp.aspects.clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, gaqp);
        assert_eq!(gaqp.modules().len(), 5);
        assert_eq!(gaqp.phases().len(), 4);
    }

    #[test]
    fn test_every_known_category_is_placed() {
        let catalog = Catalog::gaqp();
        for category in KnownCategory::ALL {
            assert!(catalog.places(category.label()), "{}", category);
        }
        assert!(!catalog.places("Marketing"));
    }

    #[test]
    fn test_known_category_fails_closed() {
        assert_eq!(
            KnownCategory::from_label("Water Management"),
            Some(KnownCategory::WaterManagement)
        );
        assert_eq!(KnownCategory::from_label("water management"), None);
        assert_eq!(KnownCategory::from_label("Marketing"), None);
    }

    #[test]
    fn test_select_module_phase_and_fallbacks() {
        let catalog = Catalog::gaqp();

        assert_eq!(catalog.select(None), Selection::All);
        assert_eq!(catalog.select(Some("all")), Selection::All);
        assert_eq!(catalog.select(Some("")), Selection::All);
        assert_eq!(catalog.select(Some("no-such-module")), Selection::All);
        assert_eq!(catalog.select(Some("phase-9")), Selection::All);

        assert_eq!(catalog.select(Some("pond-water")).id(), "pond-water");
        assert_eq!(catalog.select(Some("2")).id(), "phase-2");
        assert_eq!(catalog.select(Some("phase-3")).id(), "phase-3");
    }

    #[test]
    fn test_select_legacy_aspect() {
        let catalog = Catalog::gaqp();
        assert_eq!(
            catalog.select(Some("Infrastructure & Equipment")).id(),
            "farm-setup"
        );
        assert_eq!(
            catalog.select(Some("Feed Management")).id(),
            "disease-readiness"
        );
    }

    #[test]
    fn test_from_toml_sorts_phases() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[modules]]
            id = "water"
            name = "Water"
            categories = ["Water Management"]

            [[phases]]
            id = 2
            name = "Second"
            categories = ["Feed Management"]

            [[phases]]
            id = 1
            name = "First"
            categories = ["Water Management"]

            [aspects]
            "Old Water" = "water"
            "#,
        )
        .unwrap();

        let ids: Vec<u32> = catalog.phases().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(catalog.select(Some("Old Water")).id(), "water");
    }

    #[test]
    fn test_from_toml_rejects_reserved_and_duplicate_ids() {
        let reserved = r#"
            [[modules]]
            id = "all"
            name = "All"
            categories = []
        "#;
        assert!(matches!(
            Catalog::from_toml_str(reserved),
            Err(PlanError::InvalidCatalog(_))
        ));

        let duplicate = r#"
            [[phases]]
            id = 1
            name = "A"
            categories = []

            [[phases]]
            id = 1
            name = "B"
            categories = []
        "#;
        assert!(matches!(
            Catalog::from_toml_str(duplicate),
            Err(PlanError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_from_toml_rejects_dangling_aspect() {
        let content = r#"
            [aspects]
            "Old" = "missing"
        "#;
        assert!(Catalog::from_toml_str(content).is_err());
    }

    #[test]
    fn test_from_toml_syntax_error() {
        assert!(matches!(
            Catalog::from_toml_str("[[modules]\nid="),
            Err(PlanError::InvalidCatalog(_))
        ));
    }
}

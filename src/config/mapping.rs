//! SKU to destination filename table

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

/// Files already present in the product site, by SKU
const BUILTIN: &[(u64, &str)] = &[
    (92_736, "brisa-lima-limon-600ml-6.png"),
    (92_740, "brisa-lima-limon-15lt-pet-12.png"),
    (92_768, "brisa-manzana-280ml-pet-24.png"),
    (92_769, "brisa-manzana-600ml-6.png"),
    (160_170, "brisa-gas-lim-280ml-pet-24.png"),
    (160_046, "agua-brisa-gas-pet-600ml-24.png"),
    (160_008, "brisa-ecoflex-1-litro-6.png"),
    (160_047, "agua-brisa-pet-600ml-24.png"),
    (135_664, "coca-cola-15lt-pet12-nvo.png"),
    (135_665, "coca-cola-2lt-rp9-nvo.png"),
    (135_666, "coca-cola-125lt-rgb12-nvo.png"),
    (135_718, "coca-cola-so-8oz-vir-30.png"),
    (135_760, "coca-cola-saz-400ml-pet12kz.png"),
    (135_763, "coca-cola-saz-350ml-vr30kz.png"),
    (136_415, "coca-cola-so-500ml-pet-12.png"),
    (160_053, "coca-cola-350ml-vir30.png"),
    (160_200, "coca-cola-250-ml-12.png"),
    (160_318, "coca-cola-400ml-pet-12.png"),
    (160_121, "powerade-ion4-ft-500ml-pet6.png"),
    (160_122, "powerade-ion4-mb-500ml-pet6.png"),
    (120_117, "fresh-citrus-400ml-pet-12nvo.png"),
    (120_118, "fresh-citrus-15lt-pet12nvo.png"),
    (120_119, "fresh-citrus-25lt-pet8nvo.png"),
    (120_159, "fresh-mandarina-15lt-pet12nvo.png"),
    (120_160, "fresh-mandarina-25-lt-pet-8nvo.png"),
    (56_452, "schweppes-soda-400ml-pet12.png"),
    (56_453, "schweppes-ginger-400ml-pet12.png"),
    (56_703, "quatro-choice-250ml-pet-12.png"),
    (56_705, "quatro-choice-350ml-vir30.png"),
    (56_706, "quatro-choice-400ml-nr-12.png"),
    (56_708, "quatro-choice-125lt-vir12.png"),
    (56_709, "quatro-choice-15-lt-pet-12.png"),
    (160_100, "schweppes-ginger-15-lt-nr-12.png"),
    (160_101, "schweppes-soda-15-lt-nr-12.png"),
    (160_102, "sprite-15l-pet-12.png"),
    (160_124, "sprite-3-lts-pet-6.png"),
    (160_297, "sprite-400-ml-nr-12.png"),
];

/// Hand-authored table associating SKUs with files already present in the site
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SkuMapping(BTreeMap<u64, String>);

impl SkuMapping {
    /// Table used when the configuration has no `sku_map`
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(sku, target)| (*sku, (*target).to_string()))
            .collect()
    }

    /// Destination filename for a SKU
    pub fn target(&self, sku: u64) -> Option<&str> {
        self.0.get(&sku).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Targets must be plain file names, and no two SKUs may share one.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<&str, u64> = HashMap::new();
        for (sku, target) in &self.0 {
            if !is_plain_file_name(target) {
                return Err(config_error::invalid(format!(
                    "sku_map entry {sku}: '{target}' is not a plain file name"
                )));
            }
            if let Some(other) = seen.insert(target.as_str(), *sku) {
                return Err(config_error::invalid(format!(
                    "sku_map entries {other} and {sku} both target '{target}'"
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(u64, String)> for SkuMapping {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
}

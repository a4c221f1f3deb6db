//! Destination name resolution

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::ProductRecord;
use crate::cli::Naming;
use crate::config::SkuMapping;
use crate::ordering::ExtractedImage;
use crate::path_utils::{extension_of, slugify};

/// Why a paired image is not placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The product row has no usable SKU
    MissingSku,
    /// The SKU has no entry in the SKU map
    Unmapped { sku: u64 },
    /// The product row has no name
    MissingName,
    /// An earlier position already writes this file
    DuplicateTarget { target: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingSku => write!(f, "row has no SKU"),
            SkipReason::Unmapped { sku } => write!(f, "SKU {sku} not found in sku_map"),
            SkipReason::MissingName => write!(f, "row has no product name"),
            SkipReason::DuplicateTarget { target } => {
                write!(f, "{target} is already written by an earlier row")
            }
        }
    }
}

/// One paired position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanEntry {
    Copy {
        /// 1-based pairing position
        position: usize,
        sku: Option<u64>,
        source: PathBuf,
        source_size: u64,
        target: String,
    },
    Skip {
        position: usize,
        sku: Option<u64>,
        image: String,
        reason: SkipReason,
    },
}

/// Placement plan for one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub entries: Vec<PlanEntry>,
    /// Product rows left without an image
    pub unpaired_products: Vec<ProductRecord>,
    /// Images left without a product row
    pub unpaired_images: Vec<String>,
}

impl Plan {
    pub fn copies(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, PlanEntry::Copy { .. }))
    }

    pub fn has_copies(&self) -> bool {
        self.copies().next().is_some()
    }
}

/// Resolve destinations through the SKU map. Rows without a SKU or with an unmapped SKU
/// are skipped.
pub fn plan_replace(
    products: &[ProductRecord],
    images: &[ExtractedImage],
    mapping: &SkuMapping,
) -> Plan {
    build_plan(products, images, |product, _| match product.sku {
        None => Err(SkipReason::MissingSku),
        Some(sku) => mapping
            .target(sku)
            .map(str::to_string)
            .ok_or(SkipReason::Unmapped { sku }),
    })
}

/// Name destinations after the row itself.
pub fn plan_extract(products: &[ProductRecord], images: &[ExtractedImage], naming: Naming) -> Plan {
    build_plan(products, images, |product, image| {
        let with_ext = |stem: String| match extension_of(&image.file_name) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        };
        match naming {
            Naming::Sku => product
                .sku
                .map(|sku| with_ext(sku.to_string()))
                .ok_or(SkipReason::MissingSku),
            Naming::Name if product.name.trim().is_empty() => Err(SkipReason::MissingName),
            Naming::Name => Ok(with_ext(slugify(&product.name))),
            Naming::Original => Ok(image.file_name.clone()),
        }
    })
}

fn build_plan<F>(products: &[ProductRecord], images: &[ExtractedImage], resolve: F) -> Plan
where
    F: Fn(&ProductRecord, &ExtractedImage) -> Result<String, SkipReason>,
{
    let mut written = HashSet::new();
    let entries = products
        .iter()
        .zip(images)
        .enumerate()
        .map(|(i, (product, image))| {
            let position = i + 1;
            let resolved = resolve(product, image).and_then(|target| {
                if written.insert(target.clone()) {
                    Ok(target)
                } else {
                    Err(SkipReason::DuplicateTarget { target })
                }
            });
            match resolved {
                Ok(target) => PlanEntry::Copy {
                    position,
                    sku: product.sku,
                    source: image.path.clone(),
                    source_size: image.size,
                    target,
                },
                Err(reason) => PlanEntry::Skip {
                    position,
                    sku: product.sku,
                    image: image.file_name.clone(),
                    reason,
                },
            }
        })
        .collect();

    Plan {
        entries,
        unpaired_products: products.iter().skip(images.len()).cloned().collect(),
        unpaired_images: images
            .iter()
            .skip(products.len())
            .map(|i| i.file_name.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::digit_key;

    fn product(row: u32, sku: Option<u64>, name: &str) -> ProductRecord {
        ProductRecord {
            row,
            sku,
            name: name.to_string(),
        }
    }

    fn image(name: &str) -> ExtractedImage {
        ExtractedImage {
            file_name: name.to_string(),
            path: PathBuf::from("/scratch/xl/media").join(name),
            size: 100,
            order_key: digit_key(name),
        }
    }

    fn mapping() -> SkuMapping {
        [
            (92_736, "brisa-lima-limon-600ml-6.png".to_string()),
            (160_102, "sprite-15l-pet-12.png".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_replace_resolves_and_skips_unmapped() {
        let products = [
            product(2, Some(92_736), "Brisa"),
            product(3, Some(999), "Desconocido"),
            product(4, Some(160_102), "Sprite"),
        ];
        let images = [image("image1.png"), image("image2.png"), image("image3.png")];

        let plan = plan_replace(&products, &images, &mapping());

        assert_eq!(plan.copies().count(), 2);
        assert!(matches!(
            &plan.entries[0],
            PlanEntry::Copy { target, position: 1, .. } if target == "brisa-lima-limon-600ml-6.png"
        ));
        assert_eq!(
            plan.entries[1],
            PlanEntry::Skip {
                position: 2,
                sku: Some(999),
                image: "image2.png".to_string(),
                reason: SkipReason::Unmapped { sku: 999 },
            }
        );
        assert!(matches!(
            &plan.entries[2],
            PlanEntry::Copy { source, .. } if source.ends_with("image3.png")
        ));
    }

    #[test]
    fn test_replace_row_without_sku() {
        let plan = plan_replace(&[product(2, None, "x")], &[image("image1.png")], &mapping());
        assert!(matches!(
            plan.entries[0],
            PlanEntry::Skip {
                reason: SkipReason::MissingSku,
                ..
            }
        ));
        assert!(!plan.has_copies());
    }

    #[test]
    fn test_replace_repeated_sku_is_skipped_once() {
        let products = [product(2, Some(92_736), "a"), product(3, Some(92_736), "b")];
        let plan = plan_replace(&products, &[image("image1.png"), image("image2.png")], &mapping());
        assert!(matches!(
            &plan.entries[1],
            PlanEntry::Skip { reason: SkipReason::DuplicateTarget { target }, .. }
                if target == "brisa-lima-limon-600ml-6.png"
        ));
    }

    #[test]
    fn test_unpaired_leftovers() {
        let products = [product(2, Some(1), "a"), product(3, Some(2), "b")];
        let plan = plan_extract(&products, &[image("image1.png")], Naming::Sku);
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.unpaired_products, vec![product(3, Some(2), "b")]);

        let plan = plan_extract(&products[..1], &[image("image1.png"), image("image2.png")], Naming::Sku);
        assert_eq!(plan.unpaired_images, vec!["image2.png".to_string()]);
    }

    #[test]
    fn test_extract_naming_modes() {
        let products = [product(2, Some(56_452), "Schweppes Soda 400ml")];
        let images = [image("image7.jpeg")];

        let by_sku = plan_extract(&products, &images, Naming::Sku);
        let by_name = plan_extract(&products, &images, Naming::Name);
        let original = plan_extract(&products, &images, Naming::Original);

        let target = |plan: &Plan| match &plan.entries[0] {
            PlanEntry::Copy { target, .. } => target.clone(),
            PlanEntry::Skip { reason, .. } => format!("skip: {reason}"),
        };
        assert_eq!(target(&by_sku), "56452.jpeg");
        assert_eq!(target(&by_name), "schweppes-soda-400ml.jpeg");
        assert_eq!(target(&original), "image7.jpeg");
    }

    #[test]
    fn test_extract_by_name_requires_name() {
        let plan = plan_extract(&[product(2, Some(1), "  ")], &[image("image1.png")], Naming::Name);
        assert!(matches!(
            plan.entries[0],
            PlanEntry::Skip {
                reason: SkipReason::MissingName,
                ..
            }
        ));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::Unmapped { sku: 160_170 }.to_string(),
            "SKU 160170 not found in sku_map"
        );
    }
}

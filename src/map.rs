//! Regional map: demo stock points, filters and marker construction.
//!
//! Marker styling is passed in explicitly through [`MarkerConfig`]; nothing
//! here mutates shared defaults.

use serde::{Deserialize, Serialize};

use crate::sampler::RegionSampler;
use crate::traits::RandomSource;

/// Key products shown on the map.
pub const KEY_PRODUCTS: [&str; 8] = [
    "Roteador X1",
    "Switch Pro 24",
    "Módulo SFP+",
    "Bateria 12V",
    "Cabo CAT6",
    "ONT Z-2000",
    "Conector RJ45",
    "ONU XPTO",
];

/// Supplier names used for supplier points.
pub const SUPPLIERS: [&str; 7] = [
    "TechNord",
    "AlphaTel",
    "BrasilNet",
    "FTTx Supply",
    "Giganet",
    "OptiWare",
    "MangueLabs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    CollectionCenter,
    Supplier,
}

impl PointKind {
    pub fn label(self) -> &'static str {
        match self {
            PointKind::CollectionCenter => "Centro de Coleta",
            PointKind::Supplier => "Fornecedor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Growing,
    Shrinking,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Growing => "Crescimento",
            Trend::Shrinking => "Redução",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: String,
    pub kind: PointKind,
    pub name: String,
    pub key_product: String,
    /// Only set for supplier points.
    pub supplier: Option<String>,
    /// (lat, lng).
    pub position: (f64, f64),
    pub stock: u32,
    pub trend: Trend,
}

/// Generates `per_kind` collection centres and `per_kind` supplier points,
/// all inside the sampler's region.
pub fn generate_points<R: RandomSource + ?Sized>(
    sampler: &RegionSampler,
    per_kind: usize,
    rng: &mut R,
) -> Vec<MapPoint> {
    let mut points = Vec::with_capacity(per_kind * 2);

    for i in 0..per_kind {
        points.push(MapPoint {
            id: format!("C{i}"),
            kind: PointKind::CollectionCenter,
            name: format!("Centro de Coleta {}", i + 1),
            key_product: pick_name(&KEY_PRODUCTS, rng),
            supplier: None,
            position: sampler.sample(rng),
            stock: rng.uniform_int(50, 900) as u32,
            trend: random_trend(rng),
        });
    }
    for i in 0..per_kind {
        points.push(MapPoint {
            id: format!("F{i}"),
            kind: PointKind::Supplier,
            name: format!("Fornecedor {}", i + 1),
            supplier: Some(pick_name(&SUPPLIERS, rng)),
            key_product: pick_name(&KEY_PRODUCTS, rng),
            position: sampler.sample(rng),
            stock: rng.uniform_int(100, 1200) as u32,
            trend: random_trend(rng),
        });
    }

    for point in &mut points {
        point.position = sampler.force_into_boundary(point.position, rng);
    }
    points
}

fn pick_name<R: RandomSource + ?Sized>(names: &[&str], rng: &mut R) -> String {
    rng.pick(names).copied().unwrap_or_default().to_string()
}

fn random_trend<R: RandomSource + ?Sized>(rng: &mut R) -> Trend {
    if rng.coin() { Trend::Growing } else { Trend::Shrinking }
}

/// Map sidebar filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFilter {
    /// Case-insensitive substring of the key product.
    pub product: String,
    /// Exact supplier name.
    pub supplier: Option<String>,
    pub only_suppliers: bool,
    pub only_collection_centers: bool,
}

impl MapFilter {
    pub fn matches(&self, point: &MapPoint) -> bool {
        if self.only_suppliers && point.kind != PointKind::Supplier {
            return false;
        }
        if self.only_collection_centers && point.kind != PointKind::CollectionCenter {
            return false;
        }
        let product = self.product.trim().to_lowercase();
        if !product.is_empty() && !point.key_product.to_lowercase().contains(&product) {
            return false;
        }
        if let Some(supplier) = &self.supplier {
            if point.supplier.as_ref() != Some(supplier) {
                return false;
            }
        }
        true
    }
}

/// Points that pass `filter`, each forced into the region first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisiblePoints {
    pub points: Vec<MapPoint>,
    pub total: usize,
}

impl VisiblePoints {
    pub fn shown(&self) -> usize {
        self.points.len()
    }
}

/// Applies `filter` to `points`. Positions are re-forced into the region
/// since points may come from outside this module.
pub fn visible_points<R: RandomSource + ?Sized>(
    points: &[MapPoint],
    filter: &MapFilter,
    sampler: &RegionSampler,
    rng: &mut R,
) -> VisiblePoints {
    let visible = points
        .iter()
        .map(|point| MapPoint {
            position: sampler.force_into_boundary(point.position, rng),
            ..point.clone()
        })
        .filter(|point| filter.matches(point))
        .collect();
    VisiblePoints {
        points: visible,
        total: points.len(),
    }
}

/// Visual style of one marker kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub fill: String,
    pub border: String,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

impl MarkerStyle {
    fn dot(fill: &str, border: &str) -> Self {
        Self {
            fill: fill.to_string(),
            border: border.to_string(),
            size: (18, 18),
            anchor: (9, 9),
        }
    }
}

/// Marker styles per point kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub collection_center: MarkerStyle,
    pub supplier: MarkerStyle,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            collection_center: MarkerStyle::dot("#16a34a", "#86efac"),
            supplier: MarkerStyle::dot("#1d4ed8", "#93c5fd"),
        }
    }
}

impl MarkerConfig {
    pub fn style_for(&self, kind: PointKind) -> &MarkerStyle {
        match kind {
            PointKind::CollectionCenter => &self.collection_center,
            PointKind::Supplier => &self.supplier,
        }
    }
}

/// Everything a map renderer needs to draw one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: (f64, f64),
    pub style: MarkerStyle,
    pub title: String,
    pub details: Vec<String>,
}

impl Marker {
    pub fn new(point: &MapPoint, config: &MarkerConfig) -> Self {
        let mut details = vec![format!("Tipo: {}", point.kind.label())];
        if let Some(supplier) = &point.supplier {
            details.push(format!("Fornecedor: {supplier}"));
        }
        details.push(format!("Produto-chave: {}", point.key_product));
        details.push(format!("Estoque: {} un.", point.stock));
        details.push(format!("Tendência: {}", point.trend.label()));

        Self {
            position: point.position,
            style: config.style_for(point.kind).clone(),
            title: point.name.clone(),
            details,
        }
    }
}

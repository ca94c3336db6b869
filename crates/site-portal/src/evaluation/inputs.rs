use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Default exit valuation in US$ millions per MW.
pub const DEFAULT_EXIT_PRICE_PER_MW: f64 = 0.3;

/// Attribute bag captured on the site evaluation form.
///
/// Every field is optional on the wire. Numbers accept JSON numbers or numeric
/// strings and fall back to zero; categorical fields accept their documented
/// spellings and drop anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInputs {
    #[serde(default, deserialize_with = "lenient_number")]
    pub acreage: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub asking_price: f64,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub existing_structures: Option<ExistingStructures>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub structure_value: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub demo_cost: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub pipeline_distance: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pipeline_diameter: f64,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub terrain: Option<Terrain>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gas_volume: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gas_pressure: f64,

    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_source: Option<WaterSource>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub phase_i_status: Option<PhaseIStatus>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub air_quality_zone: Option<AirQualityZone>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub air_permit_pathway: Option<AirPermitPathway>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub permit_type: Option<PermitType>,

    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub political_climate: Option<PoliticalClimate>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub zoning: Option<Zoning>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub community_opposition: Option<CommunityOpposition>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub flood_zone: Option<Flag>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub fiber_type: Option<FiberType>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub title_complexity: Option<TitleComplexity>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub adjacent_conflict: Option<Flag>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub eminent_domain_risk: Option<Flag>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub competing_sites: Option<CompetingSites>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_queue: Option<GridQueue>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        serialize_with = "serialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub labor_market: Option<LaborMarket>,

    #[serde(
        rename = "exitPricePerMW",
        default,
        deserialize_with = "lenient_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_price_per_mw: Option<f64>,
}

impl SiteInputs {
    /// Build inputs from a stored JSON attribute bag. Anything that is not an
    /// object yields the all-default record.
    pub fn from_attribute_bag(bag: serde_json::Value) -> Self {
        serde_json::from_value(bag).unwrap_or_default()
    }

    /// Exit valuation in US$ millions per MW, falling back to the default.
    pub fn exit_price_per_mw(&self) -> f64 {
        self.exit_price_per_mw.unwrap_or(DEFAULT_EXIT_PRICE_PER_MW)
    }

    pub fn structures_usable(&self) -> bool {
        self.existing_structures == Some(ExistingStructures::Usable)
    }

    pub fn structures_demolished(&self) -> bool {
        self.existing_structures == Some(ExistingStructures::Demolish)
    }
}

/// Closed set of spellings for a categorical form field.
pub trait Categorical: Sized + Copy + PartialEq + 'static {
    /// Accepted spellings; the first entry for a variant is its canonical name.
    const VARIANTS: &'static [(&'static str, Self)];

    fn parse(raw: &str) -> Option<Self> {
        let wanted = normalize_key(raw);
        Self::VARIANTS
            .iter()
            .find(|(name, _)| normalize_key(name) == wanted)
            .map(|(_, variant)| *variant)
    }

    fn as_str(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, variant)| *variant == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingStructures {
    Usable,
    None,
    Demolish,
}

impl Categorical for ExistingStructures {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("usable", Self::Usable),
        ("none", Self::None),
        ("demolish", Self::Demolish),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Easy,
    Moderate,
    Difficult,
}

impl Categorical for Terrain {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("easy", Self::Easy),
        ("moderate", Self::Moderate),
        ("difficult", Self::Difficult),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterSource {
    Available,
    Contested,
    None,
}

impl Categorical for WaterSource {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("available", Self::Available),
        ("contested", Self::Contested),
        ("none", Self::None),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseIStatus {
    Clean,
    Flagged,
    NotConducted,
}

impl Categorical for PhaseIStatus {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("clean", Self::Clean),
        ("flagged", Self::Flagged),
        ("not_conducted", Self::NotConducted),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityZone {
    Attainment,
    Marginal,
    NonAttainment,
}

impl Categorical for AirQualityZone {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("attainment", Self::Attainment),
        ("marginal", Self::Marginal),
        ("non-attainment", Self::NonAttainment),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirPermitPathway {
    Identified,
    NotIdentified,
    Denied,
}

impl Categorical for AirPermitPathway {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("identified", Self::Identified),
        ("not_identified", Self::NotIdentified),
        ("denied", Self::Denied),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermitType {
    Minor,
    Major,
    Psd,
}

impl Categorical for PermitType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("minor", Self::Minor),
        ("major", Self::Major),
        ("PSD", Self::Psd),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoliticalClimate {
    Receptive,
    Neutral,
    Unknown,
    Hostile,
}

impl Categorical for PoliticalClimate {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("receptive", Self::Receptive),
        ("neutral", Self::Neutral),
        ("unknown", Self::Unknown),
        ("hostile", Self::Hostile),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoning {
    ByRight,
    VarianceNeeded,
    RezoningNeeded,
}

impl Categorical for Zoning {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("by-right", Self::ByRight),
        ("variance_needed", Self::VarianceNeeded),
        ("rezoning_needed", Self::RezoningNeeded),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityOpposition {
    None,
    Some,
    Organized,
}

impl Categorical for CommunityOpposition {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("none", Self::None),
        ("some", Self::Some),
        ("organized", Self::Organized),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiberType {
    Lit,
    Dark,
    None,
}

impl Categorical for FiberType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("lit", Self::Lit),
        ("dark", Self::Dark),
        ("none", Self::None),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleComplexity {
    Simple,
    Complex,
}

impl Categorical for TitleComplexity {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("simple", Self::Simple),
        ("complex", Self::Complex),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetingSites {
    None,
    Few,
    Many,
}

impl Categorical for CompetingSites {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("none", Self::None),
        ("few", Self::Few),
        ("many", Self::Many),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridQueue {
    Open,
    Congested,
}

impl Categorical for GridQueue {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("open", Self::Open),
        ("congested", Self::Congested),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaborMarket {
    Adequate,
    Tight,
}

impl Categorical for LaborMarket {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("adequate", Self::Adequate),
        ("tight", Self::Tight),
    ];
}

/// Yes/no answer used by several screening questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Yes,
    No,
}

impl Categorical for Flag {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("yes", Self::Yes),
        ("no", Self::No),
        ("true", Self::Yes),
        ("false", Self::No),
    ];
}

fn serialize_category<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Categorical,
    S: Serializer,
{
    match value {
        Some(variant) => serializer.serialize_str(variant.as_str()),
        None => serializer.serialize_none(),
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_number(deserializer)?.unwrap_or(0.0))
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NumberVisitor)
}

fn lenient_category<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Categorical,
{
    deserializer.deserialize_any(CategoryVisitor(PhantomData))
}

/// Parse a form-entered number such as `"1,250,000"` or `"$40000"`.
pub(crate) fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value).filter(|v| v.is_finite()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(parse_numeric(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

struct CategoryVisitor<T>(PhantomData<T>);

impl<'de, T: Categorical> Visitor<'de> for CategoryVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a categorical string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(T::parse(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(T::parse(if value { "true" } else { "false" }))
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

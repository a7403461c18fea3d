use crate::{Length, QuantityTrait, Speed};

/// A user-selectable display unit for a quantity kind.
pub trait UnitEnum: Copy + Eq + strum::IntoEnumIterator {
    type Quantity: QuantityTrait;

    fn to_str(self) -> &'static str;

    fn float_to_quantity(self) -> fn(f64) -> Self::Quantity;
    fn quantity_to_float(self) -> fn(Self::Quantity) -> f64;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[strum(to_string = "nm", serialize = "nautical_miles")]
    NauticalMiles,
    #[strum(to_string = "km", serialize = "kilometers")]
    Kilometers,
    #[strum(to_string = "ft", serialize = "feet")]
    Feet,
    #[strum(to_string = "mi", serialize = "miles")]
    Miles,
    #[strum(to_string = "m", serialize = "meters")]
    Meters,
}

impl UnitEnum for LengthUnit {
    type Quantity = Length<f64>;

    fn to_str(self) -> &'static str {
        match self {
            Self::NauticalMiles => "nmi",
            Self::Kilometers => "km",
            Self::Feet => "ft",
            Self::Miles => "mi",
            Self::Meters => "m",
        }
    }

    #[inline]
    fn float_to_quantity(self) -> fn(f64) -> Length<f64> {
        match self {
            Self::NauticalMiles => Length::from_nm,
            Self::Kilometers => Length::from_km,
            Self::Feet => Length::from_feet,
            Self::Miles => Length::from_miles,
            Self::Meters => Length::from_meters,
        }
    }

    #[inline]
    fn quantity_to_float(self) -> fn(Length<f64>) -> f64 {
        match self {
            Self::NauticalMiles => Length::<f64>::into_nm,
            Self::Kilometers => Length::<f64>::into_km,
            Self::Feet => Length::<f64>::into_feet,
            Self::Miles => Length::<f64>::into_miles,
            Self::Meters => Length::<f64>::into_meters,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    #[strum(to_string = "kn", serialize = "knots")]
    Knots,
    #[strum(to_string = "km/h", serialize = "kmh")]
    KilometersPerHour,
    #[strum(to_string = "m/s", serialize = "mps")]
    MetersPerSecond,
}

impl UnitEnum for SpeedUnit {
    type Quantity = Speed<f64>;

    fn to_str(self) -> &'static str {
        match self {
            Self::Knots => "kn",
            Self::KilometersPerHour => "km/h",
            Self::MetersPerSecond => "m/s",
        }
    }

    #[inline]
    fn float_to_quantity(self) -> fn(f64) -> Speed<f64> {
        match self {
            Self::Knots => Speed::from_knots,
            Self::KilometersPerHour => Speed::from_kmh,
            Self::MetersPerSecond => Speed::from_meters_per_sec,
        }
    }

    #[inline]
    fn quantity_to_float(self) -> fn(Speed<f64>) -> f64 {
        match self {
            Self::Knots => Speed::into_knots,
            Self::KilometersPerHour => Speed::into_kmh,
            Self::MetersPerSecond => Speed::into_meters_per_sec,
        }
    }
}

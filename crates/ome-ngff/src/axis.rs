use serde::{Deserialize, Serialize, Serializer};

use crate::util::{field, warn_unless};
use crate::validation::{Validate, Violation};

// https://ngff.openmicroscopy.org/0.4/#axes-md

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceUnit {
    Angstrom,
    Attometer,
    Centimeter,
    Decimeter,
    Exameter,
    Femtometer,
    Foot,
    Gigameter,
    Hectometer,
    Inch,
    Kilometer,
    Megameter,
    Meter,
    Micrometer,
    Mile,
    Millimeter,
    Nanometer,
    Parsec,
    Petameter,
    Picometer,
    Terameter,
    Yard,
    Yoctometer,
    Yottameter,
    Zeptometer,
    Zettameter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Attosecond,
    Centisecond,
    Day,
    Decisecond,
    Exasecond,
    Femtosecond,
    Gigasecond,
    Hectosecond,
    Hour,
    Kilosecond,
    Megasecond,
    Microsecond,
    Millisecond,
    Minute,
    Nanosecond,
    Petasecond,
    Picosecond,
    Second,
    Terasecond,
    Yoctosecond,
    Yottasecond,
    Zeptosecond,
    Zettasecond,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceAxis {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<SpaceUnit>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<TimeUnit>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelAxis {
    pub name: String,
}

/// An axis with a type other than "space", "time" or "channel", or with no type at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomAxis {
    pub name: String,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

// https://github.com/serde-rs/serde/issues/1799#issuecomment-624978919

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
enum TaggedAxis {
    Space(SpaceAxis),
    Time(TimeAxis),
    Channel(ChannelAxis),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeTaggedAxis {
    Tagged(TaggedAxis),
    Untagged(CustomAxis),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "MaybeTaggedAxis")]
pub enum Axis {
    Space(SpaceAxis),
    Time(TimeAxis),
    Channel(ChannelAxis),
    Custom(CustomAxis),
}

impl Axis {
    pub fn name(&self) -> &str {
        match self {
            Axis::Space(axis) => &axis.name,
            Axis::Time(axis) => &axis.name,
            Axis::Channel(axis) => &axis.name,
            Axis::Custom(axis) => &axis.name,
        }
    }

    pub fn is_space(&self) -> bool {
        matches!(self, Axis::Space(_))
    }

    pub fn is_time(&self) -> bool {
        matches!(self, Axis::Time(_))
    }

    /// Channel and custom axes share the same slot in an axes list.
    pub fn is_channel_or_custom(&self) -> bool {
        matches!(self, Axis::Channel(_) | Axis::Custom(_))
    }
}

// custom Serialize implementation because otherwise CustomAxis instances without an axis_type get a "type": "custom"
impl Serialize for Axis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Axis::Custom(axis) => axis.serialize(serializer),
            Axis::Space(axis) => TaggedAxis::Space(axis.clone()).serialize(serializer),
            Axis::Time(axis) => TaggedAxis::Time(axis.clone()).serialize(serializer),
            Axis::Channel(axis) => TaggedAxis::Channel(axis.clone()).serialize(serializer),
        }
    }
}

impl From<MaybeTaggedAxis> for Axis {
    fn from(axis: MaybeTaggedAxis) -> Axis {
        match axis {
            MaybeTaggedAxis::Untagged(axis) => Axis::Custom(axis),
            MaybeTaggedAxis::Tagged(TaggedAxis::Space(axis)) => Axis::Space(axis),
            MaybeTaggedAxis::Tagged(TaggedAxis::Time(axis)) => Axis::Time(axis),
            MaybeTaggedAxis::Tagged(TaggedAxis::Channel(axis)) => Axis::Channel(axis),
        }
    }
}

impl Validate for Axis {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        warn_unless!(
            violations,
            field(path, "name"),
            !self.name().is_empty(),
            "must not be empty"
        );

        // a "space" or "time" axis only ends up as a custom axis if its unit is not a known one
        if let Axis::Custom(CustomAxis {
            axis_type: Some(axis_type),
            unit,
            ..
        }) = self
        {
            let is_known_type = matches!(axis_type.as_str(), "space" | "time" | "channel");
            warn_unless!(
                violations,
                field(path, "unit"),
                !is_known_type,
                "{:?} is not a valid unit for an axis of type \"{}\"",
                unit.as_deref().unwrap_or_default(),
                axis_type
            );
        }
    }
}

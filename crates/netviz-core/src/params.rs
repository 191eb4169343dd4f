//! Live-tunable visual parameters.
//!
//! [`VisualParams`] is the single mutable parameter record of a viewer. It
//! starts at hard-coded defaults, is overridden by the sparse `threejs_params`
//! object shipped with the data file, and is then driven by the control panel
//! through [`VisualParams::set`], which also reports whether the change can be
//! applied in place or needs some primitive groups rebuilt.

use serde_json::Value;

/// Every tunable field of [`VisualParams`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    NodeSize,
    BloomStrength,
    Spread,
    ConnectionWidth,
    ConnectionOpacity,
    EdgeOpacity,
    StarOpacity,
    ShowEdges,
    ShowConnections,
    AutoRotate,
    ShowLabels,
    LocationNodeSize,
    CommunitySizeMin,
    CommunitySizeRange,
    MemberCountMin,
    MemberCountMax,
}

impl ParamField {
    pub const ALL: [ParamField; 16] = [
        ParamField::NodeSize,
        ParamField::BloomStrength,
        ParamField::Spread,
        ParamField::ConnectionWidth,
        ParamField::ConnectionOpacity,
        ParamField::EdgeOpacity,
        ParamField::StarOpacity,
        ParamField::ShowEdges,
        ParamField::ShowConnections,
        ParamField::AutoRotate,
        ParamField::ShowLabels,
        ParamField::LocationNodeSize,
        ParamField::CommunitySizeMin,
        ParamField::CommunitySizeRange,
        ParamField::MemberCountMin,
        ParamField::MemberCountMax,
    ];

    /// Key of this field in the data file's `threejs_params` object.
    pub fn key(self) -> &'static str {
        match self {
            ParamField::NodeSize => "node_size",
            ParamField::BloomStrength => "bloom_strength",
            ParamField::Spread => "node_spread",
            ParamField::ConnectionWidth => "connection_width",
            ParamField::ConnectionOpacity => "connection_opacity",
            ParamField::EdgeOpacity => "edge_opacity",
            ParamField::StarOpacity => "stars_opacity",
            ParamField::ShowEdges => "show_edges",
            ParamField::ShowConnections => "show_connections",
            ParamField::AutoRotate => "auto_rotate",
            ParamField::ShowLabels => "show_labels",
            ParamField::LocationNodeSize => "location_node_size",
            ParamField::CommunitySizeMin => "community_size_min",
            ParamField::CommunitySizeRange => "community_size_range",
            ParamField::MemberCountMin => "member_count_min",
            ParamField::MemberCountMax => "member_count_max",
        }
    }

    pub fn from_key(key: &str) -> Option<ParamField> {
        ParamField::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn is_flag(self) -> bool {
        matches!(
            self,
            ParamField::ShowEdges
                | ParamField::ShowConnections
                | ParamField::AutoRotate
                | ParamField::ShowLabels
        )
    }

    /// Primitive groups whose geometry depends on this field. Empty for
    /// fields that only need a restyle.
    pub fn rebuild_scope(self) -> RebuildScope {
        match self {
            ParamField::NodeSize => RebuildScope {
                nodes: true,
                representatives: true,
                connections: false,
            },
            ParamField::Spread => RebuildScope::ALL,
            ParamField::ConnectionWidth => RebuildScope {
                connections: true,
                ..RebuildScope::NONE
            },
            ParamField::LocationNodeSize => RebuildScope {
                nodes: true,
                ..RebuildScope::NONE
            },
            ParamField::CommunitySizeMin
            | ParamField::CommunitySizeRange
            | ParamField::MemberCountMin
            | ParamField::MemberCountMax => RebuildScope {
                representatives: true,
                ..RebuildScope::NONE
            },
            _ => RebuildScope::NONE,
        }
    }

    fn decimals(self) -> usize {
        match self {
            ParamField::BloomStrength | ParamField::ConnectionWidth => 1,
            ParamField::MemberCountMin | ParamField::MemberCountMax => 0,
            _ => 2,
        }
    }
}

/// A value for a [`ParamField`]: numeric sliders or boolean checkboxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Flag(bool),
}

/// Groups of primitives whose geometry must be regenerated.
///
/// Representatives always include their label sprites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildScope {
    pub nodes: bool,
    pub representatives: bool,
    pub connections: bool,
}

impl RebuildScope {
    pub const NONE: RebuildScope = RebuildScope {
        nodes: false,
        representatives: false,
        connections: false,
    };
    pub const ALL: RebuildScope = RebuildScope {
        nodes: true,
        representatives: true,
        connections: true,
    };

    pub fn is_empty(self) -> bool {
        self == RebuildScope::NONE
    }

    pub fn union(self, other: RebuildScope) -> RebuildScope {
        RebuildScope {
            nodes: self.nodes || other.nodes,
            representatives: self.representatives || other.representatives,
            connections: self.connections || other.connections,
        }
    }
}

/// What a parameter update requires from the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamChange {
    /// The value had the wrong kind for the field and was ignored.
    Unchanged,
    /// Visibility, opacity or intensity only.
    Restyle,
    /// The listed groups must be rebuilt, followed by a restyle.
    Rebuild(RebuildScope),
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualParams {
    pub node_size: f32,
    pub bloom_strength: f32,
    pub spread: f32,
    pub connection_width: f32,
    pub connection_opacity: f32,
    pub edge_opacity: f32,
    pub star_opacity: f32,
    pub show_edges: bool,
    pub show_connections: bool,
    pub auto_rotate: bool,
    pub show_labels: bool,
    pub location_node_size: f32,
    pub community_size_min: f32,
    pub community_size_range: f32,
    /// Member count mapped to the smallest representative.
    pub member_count_min: f32,
    /// Member count mapped to the largest representative.
    pub member_count_max: f32,
}

impl Default for VisualParams {
    fn default() -> Self {
        Self {
            node_size: 1.0,
            bloom_strength: 2.0,
            spread: 1.0,
            connection_width: 1.0,
            connection_opacity: 0.6,
            edge_opacity: 0.12,
            star_opacity: 0.7,
            show_edges: true,
            show_connections: true,
            auto_rotate: true,
            show_labels: true,
            location_node_size: 0.12,
            community_size_min: 0.4,
            community_size_range: 0.8,
            member_count_min: 34.0,
            member_count_max: 122.0,
        }
    }
}

impl VisualParams {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a sparse `threejs_params` object.
    ///
    /// Keys that are absent, `null`, of the wrong JSON type or unknown leave
    /// the current value untouched. Values are not range-checked.
    pub fn load(&mut self, partial: &Value) {
        let Some(obj) = partial.as_object() else {
            return;
        };
        for field in ParamField::ALL {
            let Some(raw) = obj.get(field.key()) else {
                continue;
            };
            let value = if field.is_flag() {
                raw.as_bool().map(ParamValue::Flag)
            } else {
                raw.as_f64().map(|v| ParamValue::Number(v as f32))
            };
            if let Some(v) = value {
                self.set(field, v);
            }
        }
    }

    /// Single update entry point for interactive controls.
    pub fn set(&mut self, field: ParamField, value: ParamValue) -> ParamChange {
        match value {
            ParamValue::Number(n) => match self.number_mut(field) {
                Some(slot) => *slot = n,
                None => return ParamChange::Unchanged,
            },
            ParamValue::Flag(b) => match self.flag_mut(field) {
                Some(slot) => *slot = b,
                None => return ParamChange::Unchanged,
            },
        }
        let scope = field.rebuild_scope();
        if scope.is_empty() {
            ParamChange::Restyle
        } else {
            ParamChange::Rebuild(scope)
        }
    }

    pub fn get(&self, field: ParamField) -> ParamValue {
        use ParamValue::{Flag, Number};
        match field {
            ParamField::NodeSize => Number(self.node_size),
            ParamField::BloomStrength => Number(self.bloom_strength),
            ParamField::Spread => Number(self.spread),
            ParamField::ConnectionWidth => Number(self.connection_width),
            ParamField::ConnectionOpacity => Number(self.connection_opacity),
            ParamField::EdgeOpacity => Number(self.edge_opacity),
            ParamField::StarOpacity => Number(self.star_opacity),
            ParamField::ShowEdges => Flag(self.show_edges),
            ParamField::ShowConnections => Flag(self.show_connections),
            ParamField::AutoRotate => Flag(self.auto_rotate),
            ParamField::ShowLabels => Flag(self.show_labels),
            ParamField::LocationNodeSize => Number(self.location_node_size),
            ParamField::CommunitySizeMin => Number(self.community_size_min),
            ParamField::CommunitySizeRange => Number(self.community_size_range),
            ParamField::MemberCountMin => Number(self.member_count_min),
            ParamField::MemberCountMax => Number(self.member_count_max),
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let entries = ParamField::ALL
            .into_iter()
            .map(|field| {
                let value = self.get(field);
                let text = match value {
                    ParamValue::Number(n) => format!("{:.*}", field.decimals(), n),
                    ParamValue::Flag(true) => "on".to_string(),
                    ParamValue::Flag(false) => "off".to_string(),
                };
                DisplayEntry { field, value, text }
            })
            .collect();
        DisplayState { entries }
    }

    fn number_mut(&mut self, field: ParamField) -> Option<&mut f32> {
        let slot = match field {
            ParamField::NodeSize => &mut self.node_size,
            ParamField::BloomStrength => &mut self.bloom_strength,
            ParamField::Spread => &mut self.spread,
            ParamField::ConnectionWidth => &mut self.connection_width,
            ParamField::ConnectionOpacity => &mut self.connection_opacity,
            ParamField::EdgeOpacity => &mut self.edge_opacity,
            ParamField::StarOpacity => &mut self.star_opacity,
            ParamField::LocationNodeSize => &mut self.location_node_size,
            ParamField::CommunitySizeMin => &mut self.community_size_min,
            ParamField::CommunitySizeRange => &mut self.community_size_range,
            ParamField::MemberCountMin => &mut self.member_count_min,
            ParamField::MemberCountMax => &mut self.member_count_max,
            _ => return None,
        };
        Some(slot)
    }

    fn flag_mut(&mut self, field: ParamField) -> Option<&mut bool> {
        let slot = match field {
            ParamField::ShowEdges => &mut self.show_edges,
            ParamField::ShowConnections => &mut self.show_connections,
            ParamField::AutoRotate => &mut self.auto_rotate,
            ParamField::ShowLabels => &mut self.show_labels,
            _ => return None,
        };
        Some(slot)
    }
}

/// One control's value and its formatted text.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayEntry {
    pub field: ParamField,
    pub value: ParamValue,
    pub text: String,
}

/// Snapshot of all parameters as the control panel shows them.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub entries: Vec<DisplayEntry>,
}

impl DisplayState {
    pub fn entry(&self, field: ParamField) -> Option<&DisplayEntry> {
        self.entries.iter().find(|e| e.field == field)
    }
}

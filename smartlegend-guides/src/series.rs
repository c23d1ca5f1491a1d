use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::{Rc, Weak};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_common::color::parse_color;
use smartlegend_common::types::SymbolShape;
use smartlegend_common::value::ScalarOrArray;
use strum::VariantNames;

use crate::error::SmartLegendError;

/// Shared handle to a series owned by the host chart
pub type SeriesRef = Rc<RefCell<dyn LegendSeries>>;

/// Handle held by legend entries. Upgrading fails once the host drops the series.
pub type WeakSeriesRef = Weak<RefCell<dyn LegendSeries>>;

/// Called with the series id whenever a legend label of the series changes
pub type TitleListener = Box<dyn Fn(&str)>;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Scatter,
    /// Bars, areas, pies and every other kind drawn as a filled region
    Filled,
}

impl SeriesKind {
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "line" => SeriesKind::Line,
            "scatter" => SeriesKind::Scatter,
            _ => SeriesKind::Filled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub shape: SymbolShape,
    pub radius: f32,
    /// Falls back to the series legend color when unset
    pub fill: Option<[f32; 4]>,
    pub stroke: Option<[f32; 4]>,
    pub stroke_width: Option<f32>,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            shape: SymbolShape::Circle,
            radius: 3.0,
            fill: None,
            stroke: None,
            stroke_width: None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    /// Falls back to the series legend color when unset
    pub stroke: Option<[f32; 4]>,
    pub stroke_width: f32,
    pub stroke_dash: Option<Vec<f32>>,
    pub show_markers: bool,
    pub marker: MarkerStyle,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: 2.0,
            stroke_dash: None,
            show_markers: true,
            marker: MarkerStyle::default(),
        }
    }
}

/// The view of a chart series the legend works against
pub trait LegendSeries {
    fn id(&self) -> &str;

    fn kind(&self) -> SeriesKind;

    fn show_in_legend(&self) -> bool;

    /// Number of value fields, one legend entry each
    fn field_count(&self) -> usize;

    fn field_name(&self, index: usize) -> Option<&str>;

    /// Explicit per-field legend title
    fn field_title(&self, index: usize) -> Option<&str>;

    /// Series title for a field
    fn title(&self, index: usize) -> Option<&str>;

    fn style(&self) -> &SeriesStyle;

    fn legend_color(&self, index: usize) -> Option<[f32; 4]>;

    fn is_field_visible(&self, index: usize) -> bool;

    fn hide_field(&mut self, index: usize);

    fn show_field(&mut self, index: usize);

    fn highlight_field(&mut self, index: usize);

    fn unhighlight_field(&mut self, index: usize);

    fn subscribe_title_change(&mut self, listener: TitleListener) -> SubscriptionId;

    /// Returns whether the subscription was still registered
    fn unsubscribe_title_change(&mut self, id: SubscriptionId) -> bool;

    /// Legend label for a field: explicit field title, else series title,
    /// else field name. Empty strings count as missing.
    fn label(&self, index: usize) -> String {
        [
            self.field_title(index),
            self.title(index),
            self.field_name(index),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
    }
}

/// In-memory series used by the reference chart host
pub struct Series {
    id: String,
    kind: SeriesKind,
    fields: Vec<String>,
    title: Option<ScalarOrArray<String>>,
    field_titles: Vec<String>,
    colors: Vec<[f32; 4]>,
    style: SeriesStyle,
    show_in_legend: bool,
    visible: Vec<bool>,
    highlighted: Option<usize>,
    listeners: Vec<(SubscriptionId, TitleListener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Series {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Series")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Series {
    pub fn new<S: Into<String>>(id: &str, kind: SeriesKind, fields: Vec<S>) -> Self {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let visible = vec![true; fields.len()];
        Self {
            id: id.to_string(),
            kind,
            fields,
            title: None,
            field_titles: Vec::new(),
            colors: Vec::new(),
            style: SeriesStyle::default(),
            show_in_legend: true,
            visible,
            highlighted: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn title(mut self, title: impl Into<ScalarOrArray<String>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn field_titles<S: Into<String>>(mut self, titles: Vec<S>) -> Self {
        self.field_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn colors(mut self, colors: Vec<[f32; 4]>) -> Self {
        self.colors = colors;
        self
    }

    pub fn colors_css(mut self, colors: &[&str]) -> Result<Self, SmartLegendError> {
        self.colors = colors
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    pub fn style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    pub fn show_in_legend(mut self, show: bool) -> Self {
        self.show_in_legend = show;
        self
    }

    pub fn hidden_field(mut self, index: usize) -> Self {
        if let Some(visible) = self.visible.get_mut(index) {
            *visible = false;
        }
        self
    }

    pub fn into_ref(self) -> SeriesRef {
        Rc::new(RefCell::new(self))
    }

    pub fn set_title(&mut self, title: impl Into<ScalarOrArray<String>>) {
        let before = self.labels();
        self.title = Some(title.into());
        self.notify_if_changed(before);
    }

    pub fn set_field_title(&mut self, index: usize, title: &str) {
        if index >= self.fields.len() {
            return;
        }
        let before = self.labels();
        if self.field_titles.len() <= index {
            self.field_titles.resize(index + 1, String::new());
        }
        self.field_titles[index] = title.to_string();
        self.notify_if_changed(before);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn labels(&self) -> Vec<String> {
        (0..self.fields.len()).map(|i| self.label(i)).collect()
    }

    fn notify_if_changed(&self, before: Vec<String>) {
        if before == self.labels() {
            return;
        }
        for (_, listener) in &self.listeners {
            listener(&self.id);
        }
    }
}

impl LegendSeries for Series {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn show_in_legend(&self) -> bool {
        self.show_in_legend
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_name(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    fn field_title(&self, index: usize) -> Option<&str> {
        self.field_titles.get(index).map(String::as_str)
    }

    fn title(&self, index: usize) -> Option<&str> {
        self.title.as_ref()?.get(index).map(String::as_str)
    }

    fn style(&self) -> &SeriesStyle {
        &self.style
    }

    fn legend_color(&self, index: usize) -> Option<[f32; 4]> {
        if self.colors.is_empty() {
            None
        } else {
            Some(self.colors[index % self.colors.len()])
        }
    }

    fn is_field_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    fn hide_field(&mut self, index: usize) {
        if let Some(visible) = self.visible.get_mut(index) {
            *visible = false;
        }
    }

    fn show_field(&mut self, index: usize) {
        if let Some(visible) = self.visible.get_mut(index) {
            *visible = true;
        }
    }

    fn highlight_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.highlighted = Some(index);
        }
    }

    fn unhighlight_field(&mut self, index: usize) {
        if self.highlighted == Some(index) {
            self.highlighted = None;
        }
    }

    fn subscribe_title_change(&mut self, listener: TitleListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe_title_change(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }
}

use crate::navigation::{Navigator, PassThroughNavigator};
use storeblocks_model::Product;

static PASS_THROUGH: PassThroughNavigator = PassThroughNavigator;

/// Which consumer a block is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Editor canvas: placeholders instead of live data, edit affordances
    Edit,
    /// Customer-facing storefront
    View,
}

/// Everything a block needs besides the element itself
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub mode: RenderMode,
    /// Canvas preview: edit mode with affordances hidden
    pub preview: bool,
    /// Selected element on the canvas
    pub selected: Option<&'a str>,
    pub products: &'a [Product],
    pub navigator: &'a dyn Navigator,
    pub store_id: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn edit() -> Self {
        Self {
            mode: RenderMode::Edit,
            preview: false,
            selected: None,
            products: &[],
            navigator: &PASS_THROUGH,
            store_id: "",
        }
    }

    pub fn view(store_id: &'a str, products: &'a [Product], navigator: &'a dyn Navigator) -> Self {
        Self {
            mode: RenderMode::View,
            preview: false,
            selected: None,
            products,
            navigator,
            store_id,
        }
    }

    pub fn with_selected(mut self, selected: Option<&'a str>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn is_view(&self) -> bool {
        self.mode == RenderMode::View
    }

    /// Edit affordances (add, remove, pick) are shown
    pub fn editable(&self) -> bool {
        self.mode == RenderMode::Edit && !self.preview
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.editable() && self.selected == Some(id)
    }
}

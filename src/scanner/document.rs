//! Minimal page model the scan binder drives.
//!
//! Only what the binder touches is modelled: elements addressed by id, each
//! with text, a class string and a disabled flag.

/// A page element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub class_name: String,
    pub text_content: String,
    pub disabled: bool,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

/// Element lookup and insertion.
pub trait Document {
    fn get_element_by_id(&self, id: &str) -> Option<&Element>;

    fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element>;

    /// Append an element to the end of the body.
    fn append_child(&mut self, element: Element);
}

/// In-process [`Document`] backed by a flat list of body children.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    body: Vec<Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body children in document order.
    pub fn body(&self) -> &[Element] {
        &self.body
    }
}

impl Document for MemoryDocument {
    fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.iter().find(|e| e.id == id)
    }

    fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.iter_mut().find(|e| e.id == id)
    }

    fn append_child(&mut self, element: Element) {
        self.body.push(element);
    }
}

//! DTOs for the communication log and the document register.

use crate::domain::communication::Communication;
use crate::domain::document::{Document, DocumentCategory};

pub struct CommunicationsPageData {
    pub communications: Vec<Communication>,
}

pub struct DocumentsPageData {
    pub documents: Vec<Document>,
    pub category: Option<DocumentCategory>,
}

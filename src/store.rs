//! In-memory document service.
//!
//! Documents are owned by a single user and every operation is scoped to
//! an owner. Path operations fetch the stored tree, hand it to the path
//! engine, and replace the stored tree with the returned copy while the
//! store's write lock is held, so read-modify-write cycles on the same
//! document never interleave.

use crate::diff::{compute_diff, DocumentDiff};
use crate::error::{DocError, StoreError};
use crate::mutate::{delete_path, merge_root, set_path};
use crate::navigate::resolve;
use crate::path::PathExpr;
use crate::tree::{Map, Node};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Largest page `list` will return.
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocType {
    Scroll,
    #[default]
    Parchment,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Scroll => "scroll",
            DocType::Parchment => "parchment",
        }
    }
}

impl FromStr for DocType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scroll" => Ok(DocType::Scroll),
            "parchment" => Ok(DocType::Parchment),
            _ => Err(StoreError::InvalidDocType {
                value: s.to_string(),
            }),
        }
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub doc_type: DocType,
    pub content: Node,
    pub owner: String,
    /// Bumped on every successful write
    pub revision: u64,
}

/// Input for [`DocumentStore::create`].
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub doc_type: DocType,
    pub content: Node,
}

/// Partial update for [`DocumentStore::update`]; `None` fields are kept.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<Node>,
}

#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub items: Vec<Document>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    // Insertion order doubles as creation order.
    documents: RwLock<IndexMap<Uuid, Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, owner: &str, new: NewDocument) -> Result<Document, StoreError> {
        require_object(&new.content)?;

        let document = Document {
            id: Uuid::new_v4(),
            title: new.title,
            doc_type: new.doc_type,
            content: new.content,
            owner: owner.to_string(),
            revision: 1,
        };
        self.documents
            .write()
            .insert(document.id, document.clone());

        info!(id = %document.id, owner, doc_type = document.doc_type.as_str(), "document created");
        Ok(document)
    }

    pub fn get(&self, id: Uuid, owner: &str) -> Result<Document, StoreError> {
        let documents = self.documents.read();
        owned(&documents, id, owner).cloned()
    }

    /// Lists an owner's documents, newest first.
    pub fn list(&self, owner: &str, limit: usize, offset: usize) -> Result<DocumentPage, StoreError> {
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(StoreError::InvalidPagination {
                message: format!("limit must be between 1 and {}, got {}", MAX_PAGE_SIZE, limit),
            });
        }

        let documents = self.documents.read();
        let mine: Vec<&Document> = documents
            .values()
            .rev()
            .filter(|doc| doc.owner == owner)
            .collect();

        Ok(DocumentPage {
            total: mine.len(),
            items: mine.into_iter().skip(offset).take(limit).cloned().collect(),
            limit,
            offset,
        })
    }

    pub fn update(&self, id: Uuid, owner: &str, patch: DocumentPatch) -> Result<Document, StoreError> {
        if let Some(content) = &patch.content {
            require_object(content)?;
        }

        let mut documents = self.documents.write();
        let doc = owned_mut(&mut documents, id, owner)?;
        if let Some(title) = patch.title {
            doc.title = title;
        }
        if let Some(content) = patch.content {
            doc.content = content;
        }
        doc.revision += 1;
        debug!(%id, revision = doc.revision, "document updated");
        Ok(doc.clone())
    }

    pub fn remove(&self, id: Uuid, owner: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write();
        owned(&documents, id, owner)?;
        documents.shift_remove(&id);
        info!(%id, "document removed");
        Ok(())
    }

    /// Resolves `path` inside a document.
    pub fn get_path(&self, id: Uuid, owner: &str, path: &PathExpr) -> Result<Node, StoreError> {
        let documents = self.documents.read();
        let doc = owned(&documents, id, owner)?;
        Ok(resolve(&doc.content, path)?.clone())
    }

    /// Sets `value` at `path`, creating intermediate objects as needed.
    pub fn patch_path(
        &self,
        id: Uuid,
        owner: &str,
        path: &PathExpr,
        value: Node,
    ) -> Result<Document, StoreError> {
        let mut documents = self.documents.write();
        let doc = owned_mut(&mut documents, id, owner)?;
        doc.content = set_path(&doc.content, path, value);
        doc.revision += 1;
        debug!(%id, %path, revision = doc.revision, "path set");
        Ok(doc.clone())
    }

    /// Removes the key at `path`; the stored document is untouched on error.
    pub fn delete_path(&self, id: Uuid, owner: &str, path: &PathExpr) -> Result<Document, StoreError> {
        let mut documents = self.documents.write();
        let doc = owned_mut(&mut documents, id, owner)?;
        doc.content = delete_path(&doc.content, path)?;
        doc.revision += 1;
        debug!(%id, %path, revision = doc.revision, "path deleted");
        Ok(doc.clone())
    }

    /// Diffs two documents of the same owner.
    pub fn diff(&self, a: Uuid, b: Uuid, owner: &str) -> Result<DocumentDiff, StoreError> {
        let documents = self.documents.read();
        let doc_a = owned(&documents, a, owner)?;
        let doc_b = owned(&documents, b, owner)?;
        Ok(compute_diff(&doc_a.content, &doc_b.content)?)
    }

    /// Shallow-merges a sync payload into the root of every document.
    ///
    /// Returns the number of documents touched.
    pub fn merge_into_all(&self, payload: &Map) -> usize {
        if payload.is_empty() {
            debug!("empty sync payload, nothing to merge");
            return 0;
        }

        let mut documents = self.documents.write();
        if documents.is_empty() {
            debug!("no documents to sync");
            return 0;
        }

        for doc in documents.values_mut() {
            doc.content = merge_root(&doc.content, payload);
            doc.revision += 1;
        }

        info!(
            keys = payload.len(),
            documents = documents.len(),
            "sync payload merged"
        );
        documents.len()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

fn require_object(content: &Node) -> Result<(), DocError> {
    if content.is_object() {
        Ok(())
    } else {
        Err(DocError::NotAContainer {
            side: "document",
            found: content.type_name(),
        })
    }
}

fn owned<'a>(
    documents: &'a IndexMap<Uuid, Document>,
    id: Uuid,
    owner: &str,
) -> Result<&'a Document, StoreError> {
    let doc = documents
        .get(&id)
        .ok_or(StoreError::DocumentNotFound { id })?;
    if doc.owner != owner {
        return Err(StoreError::AccessDenied { id });
    }
    Ok(doc)
}

fn owned_mut<'a>(
    documents: &'a mut IndexMap<Uuid, Document>,
    id: Uuid,
    owner: &str,
) -> Result<&'a mut Document, StoreError> {
    let doc = documents
        .get_mut(&id)
        .ok_or(StoreError::DocumentNotFound { id })?;
    if doc.owner != owner {
        return Err(StoreError::AccessDenied { id });
    }
    Ok(doc)
}

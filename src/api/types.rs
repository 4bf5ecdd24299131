// src/api/types.rs
//! Request bodies for the two Notion writes the publisher issues.

use crate::constants::DATABASE_TITLE_PROPERTY;
use crate::model::{ContentBlock, RichText};
use crate::types::NormalizedId;
use serde::Serialize;
use std::collections::BTreeMap;

/// `POST /v1/pages` body creating a row in a database.
#[derive(Debug, Serialize)]
pub struct CreatePageRequest<'a> {
    pub parent: DatabaseParent<'a>,
    pub properties: BTreeMap<&'static str, TitleProperty<'a>>,
    pub children: &'a [ContentBlock],
}

#[derive(Debug, Serialize)]
pub struct DatabaseParent<'a> {
    pub database_id: &'a NormalizedId,
}

#[derive(Debug, Serialize)]
pub struct TitleProperty<'a> {
    pub title: Vec<RichText<'a>>,
}

impl<'a> CreatePageRequest<'a> {
    pub fn new(
        database_id: &'a NormalizedId,
        title: &'a str,
        children: &'a [ContentBlock],
    ) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            DATABASE_TITLE_PROPERTY,
            TitleProperty {
                title: vec![RichText::plain(title)],
            },
        );
        Self {
            parent: DatabaseParent { database_id },
            properties,
            children,
        }
    }
}

/// `PATCH /v1/blocks/{id}/children` body appending to a page.
#[derive(Debug, Serialize)]
pub struct AppendChildrenRequest<'a> {
    pub children: &'a [ContentBlock],
}

use sqlx::PgPool;

use crate::database::models::{EditableContent, EditableContentCreate, EditableContentUpdate};
use crate::database::repository::Changes;
use crate::database::{DatabaseError, Repository};

const TABLE: &str = "EditableContent";

/// How a content block is addressed
#[derive(Debug, Clone, Copy)]
pub enum BlockRef<'a> {
    Id(&'a str),
    Key { page_slug: &'a str, block_key: &'a str },
}

impl<'a> BlockRef<'a> {
    fn filter(&self) -> Vec<(&'static str, &'a str)> {
        match *self {
            BlockRef::Id(id) => vec![("id", id)],
            BlockRef::Key {
                page_slug,
                block_key,
            } => vec![("pageSlug", page_slug), ("blockKey", block_key)],
        }
    }

    fn describe(&self) -> String {
        match self {
            BlockRef::Id(id) => format!("Content block '{}' not found", id),
            BlockRef::Key {
                page_slug,
                block_key,
            } => format!("Content block '{}' on page '{}' not found", block_key, page_slug),
        }
    }
}

pub struct EditableContentService {
    repo: Repository<EditableContent>,
}

impl EditableContentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(TABLE, pool),
        }
    }

    pub async fn create(
        &self,
        input: EditableContentCreate,
    ) -> Result<EditableContent, DatabaseError> {
        let conflict = format!(
            "Content block '{}' already exists on page '{}'",
            input.block_key, input.page_slug
        );
        self.repo
            .insert(
                vec![
                    ("pageSlug", Some(input.page_slug)),
                    ("blockKey", Some(input.block_key)),
                    ("content", Some(input.content)),
                    ("contentType", Some(input.content_type)),
                ],
                || conflict,
            )
            .await
    }

    /// All blocks, or just one page's when `page_slug` is given
    pub async fn list(&self, page_slug: Option<&str>) -> Result<Vec<EditableContent>, DatabaseError> {
        match page_slug {
            Some(slug) => self.repo.select_any(&[("pageSlug", slug)]).await,
            None => self.repo.select_any(&[]).await,
        }
    }

    pub async fn get(&self, block: BlockRef<'_>) -> Result<EditableContent, DatabaseError> {
        self.repo
            .select_404(&block.filter(), || block.describe())
            .await
    }

    /// Caller guarantees `input` names at least one field
    pub async fn update(
        &self,
        block: BlockRef<'_>,
        input: EditableContentUpdate,
    ) -> Result<EditableContent, DatabaseError> {
        self.repo
            .update_404(changes(input), &block.filter(), || block.describe())
            .await
    }

    pub async fn delete(&self, block: BlockRef<'_>) -> Result<(), DatabaseError> {
        self.repo
            .delete_404(&block.filter(), || block.describe())
            .await
    }
}

fn changes(input: EditableContentUpdate) -> Changes {
    let mut changes = Vec::new();
    if let Some(content) = input.content {
        changes.push(("content", Some(content)));
    }
    if let Some(content_type) = input.content_type {
        changes.push(("contentType", Some(content_type)));
    }
    changes
}

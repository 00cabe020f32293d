use sqlx::PgPool;

use crate::database::models::{PageSeo, PageSeoCreate, PageSeoUpdate};
use crate::database::repository::Changes;
use crate::database::{DatabaseError, Repository};

const TABLE: &str = "PageSEO";

/// SEO metadata, one row per page slug
pub struct PageSeoService {
    repo: Repository<PageSeo>,
}

impl PageSeoService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(TABLE, pool),
        }
    }

    pub async fn create(&self, input: PageSeoCreate) -> Result<PageSeo, DatabaseError> {
        let slug = input.page_slug.clone();
        self.repo
            .insert(
                vec![
                    ("pageSlug", Some(input.page_slug)),
                    ("title", input.title),
                    ("description", input.description),
                    ("keywords", input.keywords),
                ],
                || format!("SEO entry for page '{}' already exists", slug),
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<PageSeo>, DatabaseError> {
        self.repo.select_any(&[]).await
    }

    pub async fn get(&self, page_slug: &str) -> Result<PageSeo, DatabaseError> {
        self.repo
            .select_404(&[("pageSlug", page_slug)], || missing(page_slug))
            .await
    }

    /// Caller guarantees `input` names at least one field
    pub async fn update(
        &self,
        page_slug: &str,
        input: PageSeoUpdate,
    ) -> Result<PageSeo, DatabaseError> {
        self.repo
            .update_404(changes(input), &[("pageSlug", page_slug)], || {
                missing(page_slug)
            })
            .await
    }

    pub async fn delete(&self, page_slug: &str) -> Result<(), DatabaseError> {
        self.repo
            .delete_404(&[("pageSlug", page_slug)], || missing(page_slug))
            .await
    }
}

fn changes(input: PageSeoUpdate) -> Changes {
    [
        ("title", input.title),
        ("description", input.description),
        ("keywords", input.keywords),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.map(|v| (column, v)))
    .collect()
}

fn missing(page_slug: &str) -> String {
    format!("SEO entry for page '{}' not found", page_slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_supplied_fields_become_changes() {
        let update = PageSeoUpdate {
            title: Some(Some("Home".into())),
            description: Some(None),
            keywords: None,
        };
        assert_eq!(
            changes(update),
            vec![("title", Some("Home".to_string())), ("description", None)]
        );
    }
}

//! Paged entity cursor
//!
//! Streams products matching a filter in bounded pages, joining the stock
//! record and resolved category paths of each product. With a non-zero
//! prefetch depth the pages are fetched by a background task feeding a
//! bounded channel; consumption order is the same either way.

use crate::adapters::catalog::{CatalogRepository, PageRequest};
use crate::domain::{Category, CategoryId, FilterSpec, Product, ProductId, Result, StockItem};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cursor sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOptions {
    /// Products per page
    pub page_size: usize,
    /// Pages fetched ahead; 0 fetches inline
    pub prefetch_depth: usize,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            page_size: 500,
            prefetch_depth: 1,
        }
    }
}

/// Product joined with its scoped data
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntity {
    pub product: Product,
    /// Stock record, defaulted when the catalog has none
    pub stock: StockItem,
    /// Resolvable category paths in category id order
    pub category_paths: Vec<String>,
}

/// One page of entities
#[derive(Debug, Clone)]
pub struct EntityBatch {
    /// Zero-based page number
    pub index: usize,
    pub entities: Vec<CatalogEntity>,
}

impl EntityBatch {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Category name paths below the tree root
///
/// Names are joined with `/`; a `/` inside a name is written as `\/`.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: BTreeMap<CategoryId, Category>,
}

impl CategoryTree {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            nodes: categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Path of a category, or `None` if the category or one of its
    /// ancestors cannot be resolved. The tree root itself has no path.
    pub fn path(&self, id: CategoryId) -> Option<String> {
        let mut names = Vec::new();
        let mut visited = BTreeSet::new();
        let mut current = self.nodes.get(&id)?;

        loop {
            if !visited.insert(current.id) {
                return None;
            }
            match current.parent_id {
                None => break,
                Some(parent_id) => {
                    names.push(current.name.replace('/', "\\/"));
                    current = self.nodes.get(&parent_id)?;
                }
            }
        }

        if names.is_empty() {
            return None;
        }
        names.reverse();
        Some(names.join("/"))
    }

    /// Paths of every resolvable category of a product; broken ones are skipped
    pub fn product_paths(&self, product: &Product) -> Vec<String> {
        product
            .category_ids
            .iter()
            .filter_map(|id| {
                let path = self.path(*id);
                if path.is_none() {
                    tracing::warn!(
                        sku = %product.sku,
                        category_id = %id,
                        "Skipping unresolvable category path"
                    );
                }
                path
            })
            .collect()
    }
}

/// Fetches pages inline
struct PageFetcher {
    repository: Arc<dyn CatalogRepository>,
    filter: FilterSpec,
    tree: CategoryTree,
    page_size: usize,
    after: Option<ProductId>,
    next_index: usize,
    exhausted: bool,
}

impl PageFetcher {
    async fn fetch_next(&mut self) -> Result<Option<EntityBatch>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = PageRequest {
            after: self.after,
            limit: self.page_size,
        };
        let products = self.repository.list(&self.filter, page).await?;
        if products.len() < self.page_size {
            self.exhausted = true;
        }

        let Some(last) = products.last() else {
            return Ok(None);
        };
        self.after = Some(last.id);

        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        let mut stock = self.repository.stock_items(&ids).await?;

        let entities = products
            .into_iter()
            .map(|product| {
                let category_paths = self.tree.product_paths(&product);
                CatalogEntity {
                    stock: stock.remove(&product.id).unwrap_or_default(),
                    category_paths,
                    product,
                }
            })
            .collect();

        let batch = EntityBatch {
            index: self.next_index,
            entities,
        };
        self.next_index += 1;
        Ok(Some(batch))
    }
}

enum Source {
    Inline(Box<PageFetcher>),
    Prefetch {
        receiver: mpsc::Receiver<Result<EntityBatch>>,
        task: JoinHandle<()>,
    },
}

/// Lazy, finite sequence of entity batches
///
/// Not restartable; open a new cursor for a new run.
pub struct EntityCursor {
    source: Source,
    finished: bool,
}

impl EntityCursor {
    /// Opens a cursor over products matching the filter
    ///
    /// # Errors
    ///
    /// Returns a data source error if the category tree cannot be read
    pub async fn open(
        repository: Arc<dyn CatalogRepository>,
        filter: FilterSpec,
        options: CursorOptions,
    ) -> Result<Self> {
        let tree = CategoryTree::new(repository.categories().await?);
        let fetcher = PageFetcher {
            repository,
            filter,
            tree,
            page_size: options.page_size.max(1),
            after: None,
            next_index: 0,
            exhausted: false,
        };

        let source = if options.prefetch_depth == 0 {
            Source::Inline(Box::new(fetcher))
        } else {
            let (sender, receiver) = mpsc::channel(options.prefetch_depth);
            let task = tokio::spawn(prefetch(fetcher, sender));
            Source::Prefetch { receiver, task }
        };

        Ok(Self {
            source,
            finished: false,
        })
    }

    /// Next batch, or `None` once the sequence is exhausted
    ///
    /// After an error the cursor is finished and yields `None`.
    pub async fn next_batch(&mut self) -> Result<Option<EntityBatch>> {
        if self.finished {
            return Ok(None);
        }

        let next = match &mut self.source {
            Source::Inline(fetcher) => fetcher.fetch_next().await,
            Source::Prefetch { receiver, .. } => receiver.recv().await.transpose(),
        };

        if !matches!(next, Ok(Some(_))) {
            self.finished = true;
        }
        next
    }
}

impl Drop for EntityCursor {
    fn drop(&mut self) {
        if let Source::Prefetch { task, .. } = &self.source {
            task.abort();
        }
    }
}

async fn prefetch(mut fetcher: PageFetcher, sender: mpsc::Sender<Result<EntityBatch>>) {
    loop {
        match fetcher.fetch_next().await {
            Ok(Some(batch)) => {
                if sender.send(Ok(batch)).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                let _ = sender.send(Err(e)).await;
                break;
            }
        }
    }
}

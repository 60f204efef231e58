use std::collections::HashSet;

use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};

use crate::{
    Category, CategoryNew, CategoryPatch, EngineError, ResultEngine, TransactionType,
    categories,
    error::{CATEGORY_NAME_EMPTY, CATEGORY_TYPE_MISSING},
    tree::{ParentIndex, hierarchy_cmp},
    util::{IN_LIST_CHUNK, contains_folded, fold, non_blank},
};

use super::{Engine, with_tx};

/// `(id, parent_id)` of every category whose parent is in `parent_ids`.
async fn child_pairs<C: ConnectionTrait>(
    db: &C,
    parent_ids: &[i64],
) -> ResultEngine<Vec<(i64, Option<i64>)>> {
    let mut pairs = Vec::new();
    for chunk in parent_ids.chunks(IN_LIST_CHUNK) {
        let rows: Vec<(i64, Option<i64>)> = categories::Entity::find()
            .select_only()
            .column(categories::Column::Id)
            .column(categories::Column::ParentId)
            .filter(categories::Column::ParentId.is_in(chunk.iter().copied()))
            .into_tuple()
            .all(db)
            .await?;
        pairs.extend(rows);
    }
    Ok(pairs)
}

/// Turn models into categories and fill in their `children`.
async fn with_children<C: ConnectionTrait>(
    db: &C,
    models: Vec<categories::Model>,
) -> ResultEngine<Vec<Category>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let index = ParentIndex::from_pairs(child_pairs(db, &ids).await?);

    models
        .into_iter()
        .map(|model| {
            let mut category = Category::try_from(model)?;
            category.children = index.children(category.id).to_vec();
            Ok(category)
        })
        .collect()
}

/// Fail with a validation error unless `parent_id` names a stored category.
async fn require_parent<C: ConnectionTrait>(db: &C, parent_id: i64) -> ResultEngine<()> {
    let exists = categories::Entity::find_by_id(parent_id)
        .one(db)
        .await?
        .is_some();
    if !exists {
        return Err(EngineError::Validation(format!(
            "Parent category not found with id: {parent_id}"
        )));
    }
    Ok(())
}

impl Engine {
    /// Store a new category.
    ///
    /// The name is trimmed and must not be blank, the type is required. The
    /// parent, if any, must exist; its type is not compared with the new one.
    pub async fn create_category(&self, cmd: CategoryNew) -> ResultEngine<Category> {
        let name = non_blank(&cmd.name)
            .ok_or_else(|| EngineError::Validation(CATEGORY_NAME_EMPTY.to_string()))?;
        let kind = cmd
            .kind
            .ok_or_else(|| EngineError::Validation(CATEGORY_TYPE_MISSING.to_string()))?;

        with_tx!(self, |db_tx| {
            if let Some(parent_id) = cmd.parent_id {
                require_parent(&db_tx, parent_id).await?;
            }

            let active = categories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                kind: ActiveValue::Set(kind.as_str().to_string()),
                parent_id: ActiveValue::Set(cmd.parent_id),
            };
            let model = active.insert(&db_tx).await?;
            Category::try_from(model)
        })
    }

    /// Return a category with its children, `None` if the id is unknown.
    pub async fn category(&self, id: i64) -> ResultEngine<Option<Category>> {
        let Some(model) = categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };
        Ok(with_children(&self.database, vec![model]).await?.pop())
    }

    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        with_children(&self.database, models).await
    }

    pub async fn categories_by_type(&self, kind: TransactionType) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Kind.eq(kind.as_str()))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        with_children(&self.database, models).await
    }

    /// Categories of `kind` without a parent.
    pub async fn root_categories(&self, kind: TransactionType) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Kind.eq(kind.as_str()))
            .filter(categories::Column::ParentId.is_null())
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        with_children(&self.database, models).await
    }

    /// Direct children of `parent_id`.
    ///
    /// An unknown parent and a parent without children both give an empty list.
    pub async fn child_categories(&self, parent_id: i64) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::ParentId.eq(parent_id))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        with_children(&self.database, models).await
    }

    /// Categories of `kind` in hierarchy order: roots first by name, then
    /// children grouped by parent id, each group by name.
    pub async fn categories_hierarchy(
        &self,
        kind: TransactionType,
    ) -> ResultEngine<Vec<Category>> {
        let mut categories = self.categories_by_type(kind).await?;
        categories.sort_by(hierarchy_cmp);
        Ok(categories)
    }

    /// Categories of `kind` whose name contains `pattern`, ignoring case.
    pub async fn search_categories(
        &self,
        pattern: &str,
        kind: TransactionType,
    ) -> ResultEngine<Vec<Category>> {
        let needle = fold(pattern);
        let models = categories::Entity::find()
            .filter(categories::Column::Kind.eq(kind.as_str()))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .filter(|model| contains_folded(&model.name, &needle))
            .collect();
        with_children(&self.database, models).await
    }

    /// Apply a partial update.
    ///
    /// A blank name is ignored, absent type and parent keep the stored ones.
    pub async fn update_category(&self, id: i64, patch: CategoryPatch) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            let model = categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::category_not_found(id))?;

            let mut active: categories::ActiveModel = model.clone().into();
            if let Some(name) = patch.name.as_deref().and_then(non_blank) {
                active.name = ActiveValue::Set(name);
            }
            if let Some(kind) = patch.kind {
                active.kind = ActiveValue::Set(kind.as_str().to_string());
            }
            if let Some(parent_id) = patch.parent_id {
                require_parent(&db_tx, parent_id).await?;
                active.parent_id = ActiveValue::Set(Some(parent_id));
            }

            let model = if active.is_changed() {
                active.update(&db_tx).await?
            } else {
                model
            };

            let mut updated = with_children(&db_tx, vec![model]).await?;
            updated
                .pop()
                .ok_or_else(|| EngineError::category_not_found(id))
        })
    }

    /// Delete a category together with all of its descendants.
    ///
    /// Returns the number of removed categories.
    pub async fn delete_category(&self, id: i64) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let exists = categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_some();
            if !exists {
                return Err(EngineError::category_not_found(id));
            }

            let mut pairs: Vec<(i64, Option<i64>)> = Vec::new();
            let mut seen = HashSet::from([id]);
            let mut frontier = vec![id];
            while !frontier.is_empty() {
                let level = child_pairs(&db_tx, &frontier).await?;
                frontier = level
                    .iter()
                    .filter(|(child, _)| seen.insert(*child))
                    .map(|(child, _)| *child)
                    .collect();
                pairs.extend(level);
            }

            // Rows may already be gone through the FK cascade when parents loop.
            let subtree = ParentIndex::from_pairs(pairs).subtree(id);
            for category_id in &subtree {
                categories::Entity::delete_by_id(*category_id)
                    .exec(&db_tx)
                    .await?;
            }
            Ok(subtree.len() as u64)
        })
    }

    pub async fn count_categories(&self) -> ResultEngine<u64> {
        Ok(categories::Entity::find().count(&self.database).await?)
    }
}

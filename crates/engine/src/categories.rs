//! Income and expense categories.
//!
//! Categories form a forest per [`TransactionType`]: a category either has no
//! parent (a root) or points at another category through `parent_id`. The
//! inverse relation, `children`, is never stored; it is filled in when
//! categories are read.
//!
//! Nothing checks that a child has the same type as its parent, and nothing
//! prevents a category from becoming its own ancestor.

use sea_orm::entity::prelude::*;

use crate::{EngineError, TransactionType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Identifier assigned by storage on insert.
    pub id: i64,
    pub name: String,
    pub kind: TransactionType,
    pub parent_id: Option<i64>,
    /// Ids of the categories whose parent is this one, ascending.
    pub children: Vec<i64>,
}

impl Category {
    /// A category without parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub parent_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            kind: model.kind.parse()?,
            parent_id: model.parent_id,
            children: Vec::new(),
        })
    }
}

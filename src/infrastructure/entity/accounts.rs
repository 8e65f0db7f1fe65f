use std::{collections::HashSet, str::FromStr};

use sea_orm::{ColumnType, IdenStatic, Iterable, Value, entity::prelude::*};

use crate::domain::{error::DomainError, models::record::FieldAccess};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub display_name: String,
    pub password: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Names of the columns this active model will write
pub fn changed_fields(model: &ActiveModel) -> HashSet<String> {
    Column::iter()
        .filter(|column| model.get(*column).is_set())
        .map(|column| column.as_str().to_string())
        .collect()
}

fn text_column(field: &str) -> Result<Column, DomainError> {
    let column =
        Column::from_str(field).map_err(|_| DomainError::UnknownField(field.to_string()))?;

    match column.def().get_column_type() {
        ColumnType::String(_) | ColumnType::Text | ColumnType::Char(_) => Ok(column),
        _ => Err(DomainError::InvalidFieldType(field.to_string())),
    }
}

impl FieldAccess for ActiveModel {
    fn get_field(&self, field: &str) -> Result<Option<String>, DomainError> {
        let column = text_column(field)?;

        match self.get(column).into_value() {
            Some(Value::String(Some(text))) => Ok(Some(text.to_string())),
            Some(Value::String(None)) | None => Ok(None),
            Some(_) => Err(DomainError::InvalidFieldType(field.to_string())),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), DomainError> {
        let column = text_column(field)?;
        self.set(column, Value::from(value));
        Ok(())
    }
}

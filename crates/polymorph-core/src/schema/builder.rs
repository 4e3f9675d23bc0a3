use super::{Model, Schema};
use crate::{Error, Result};

use heck::ToSnakeCase;
use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<Model>,

    /// Prefix prepended to derived table names
    table_name_prefix: Option<String>,
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for model in &self.models {
            let mut model = model.clone();

            if model.table_name.is_none() {
                model.table_name = Some(self.table_name(&model.name));
            }

            if models.contains_key(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate model `{}`",
                    model.name
                )));
            }

            models.insert(model.name.clone(), model);
        }

        let schema = Schema { models };
        schema.verify()?;
        Ok(schema)
    }

    /// `BlogPost` -> `blog_posts`, with the prefix if one is set.
    fn table_name(&self, model_name: &str) -> String {
        let prefix = self.table_name_prefix.as_deref().unwrap_or_default();
        format!("{prefix}{}s", model_name.to_snake_case())
    }
}

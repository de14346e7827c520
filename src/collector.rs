//! # Collector
//! Mass-produce prompts with a [PromptBuilder] by taking the Cartesian product of user's prompts, instructions and settings.
//!
//! Each collected prompt is recorded with a [Recipe], i.e. the indices of the user's prompt and the instructions and the
//! settings string that produced it. Collecting is additive: every call to [PromptCollector::collect] appends to what
//! was collected before and nothing is ever removed.

use serde::Serialize;
use serde_json::json;
use crate::prompt::PromptBuilder;
use crate::prompt::settings::Settings;
use crate::utils::table::Table;

/// Column names of [PromptCollector::export_table].
pub const TABLE_COLUMNS: [&str; 4] = ["user_prompt_index", "instruction_index", "settings", "prompt"];

/// How a collected prompt was built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Recipe {
    pub user_prompt_index: usize,
    pub instruction_index: usize,
    pub settings: String,
}

impl From<Recipe> for (usize, usize, String) {
    fn from(recipe: Recipe) -> Self {
        (recipe.user_prompt_index, recipe.instruction_index, recipe.settings)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptCollector {
    builder: PromptBuilder,
    prompts: Vec<String>,
    recipes: Vec<Recipe>,
}

impl PromptCollector {
    pub fn new(role: impl Into<String>, paragraph_separator: char, character_separator: char) -> Self {
        Self::with_builder(PromptBuilder::new(role, paragraph_separator, character_separator))
    }

    pub fn with_builder(builder: PromptBuilder) -> Self {
        Self {
            builder,
            prompts: Vec::new(),
            recipes: Vec::new(),
        }
    }

    #[inline]
    pub fn builder(&self) -> &PromptBuilder {
        &self.builder
    }

    /// Build a prompt for every combination of user's prompt, instructions and settings.
    ///
    /// The user's prompt index varies slowest and the settings fastest, and results are appended in that order.
    pub fn collect<U, I, S>(&mut self, user_prompts: &[U], instructions: &[I], settings_list: &[S]) -> &mut Self
        where U: AsRef<str>,
              I: AsRef<str>,
              S: AsRef<str> {
        let decoded: Vec<Settings> = settings_list.iter().map(|s| Settings::parse(s.as_ref())).collect();
        let combinations = user_prompts.len() * instructions.len() * settings_list.len();
        self.prompts.reserve(combinations);
        self.recipes.reserve(combinations);
        for (user_prompt_index, user_prompt) in user_prompts.iter().enumerate() {
            for (instruction_index, instruction) in instructions.iter().enumerate() {
                for (markers, settings) in settings_list.iter().zip(decoded.iter()) {
                    let prompt = self.builder.build(user_prompt.as_ref(), instruction.as_ref(), *settings);
                    self.prompts.push(prompt);
                    self.recipes.push(Recipe {
                        user_prompt_index,
                        instruction_index,
                        settings: markers.as_ref().to_string(),
                    });
                }
            }
        }
        self
    }

    /// All prompts collected so far.
    #[inline]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// The recipes of [Self::prompts], in the same order.
    #[inline]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=(&Recipe, &str)> {
        self.recipes.iter().zip(self.prompts.iter().map(String::as_str))
    }

    /// Project recipes and prompts into a table with the columns in [TABLE_COLUMNS], one row per collected prompt.
    pub fn export_table(&self) -> Table {
        let rows = self.iter()
            .map(|(recipe, prompt)| vec![
                json!(recipe.user_prompt_index),
                json!(recipe.instruction_index),
                json!(recipe.settings),
                json!(prompt),
            ])
            .collect();
        Table::from_parts_unchecked(TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(), rows)
    }

    /// Consume the collector and return the prompts and the recipes.
    pub fn into_parts(self) -> (Vec<String>, Vec<Recipe>) {
        (self.prompts, self.recipes)
    }
}

#[cfg(test)]
mod test_collector {
    use serde_json::json;
    use crate::prompt::PromptBuilder;
    use super::{PromptCollector, Recipe};

    fn recipe(user_prompt_index: usize, instruction_index: usize, settings: &str) -> Recipe {
        Recipe {
            user_prompt_index,
            instruction_index,
            settings: settings.to_string(),
        }
    }

    #[test]
    fn test_cartesian_order() {
        let mut collector = PromptCollector::new("Bot", '-', '+');
        collector.collect(&["a", "b"], &["x"], &["", "r"]);
        assert_eq!(4, collector.len());
        assert_eq!(collector.recipes(), &[
            recipe(0, 0, ""),
            recipe(0, 0, "r"),
            recipe(1, 0, ""),
            recipe(1, 0, "r"),
        ]);
        let builder = collector.builder().clone();
        assert_eq!(collector.prompts(), &[
            builder.build("a", "x", ""),
            builder.build("a", "x", "r"),
            builder.build("b", "x", ""),
            builder.build("b", "x", "r"),
        ]);
    }

    #[test]
    fn test_collect_is_additive() {
        let mut collector = PromptCollector::default();
        collector
            .collect(&["a"], &["x", "y"], &["c"])
            .collect(&["b".to_string()], &["z".to_string()], &["p".to_string()]);
        assert_eq!(3, collector.len());
        assert_eq!(collector.recipes()[2], recipe(0, 0, "p"));
        assert_eq!(collector.prompts()[2], PromptBuilder::default().build("b", "z", "p"));
    }

    #[test]
    fn test_empty_inputs() {
        let mut collector = PromptCollector::default();
        let none: [&str; 0] = [];
        collector.collect(&["a"], &none, &[""]);
        assert!(collector.is_empty());
        assert_eq!((0, 4), collector.export_table().shape());
    }

    #[test]
    fn test_export_table() {
        let mut collector = PromptCollector::default();
        collector.collect(&["q"], &["", "i"], &["f"]);
        let table = collector.export_table();
        assert_eq!(vec!["user_prompt_index", "instruction_index", "settings", "prompt"], table.columns);
        assert_eq!((2, 4), table.shape());
        assert_eq!(table.rows[1], vec![json!(0), json!(1), json!("f"), json!("q\ni\n")]);
        // export is a projection, collecting continues afterwards
        collector.collect(&["r"], &[""], &[""]);
        assert_eq!((3, 4), collector.export_table().shape());
    }
}

use crate::state::{Notice, Screen};
use crate::{ActionType, AppState, Ingredient, PollingStatus, RecipeDetail};

/// Group label for ingredients without one.
pub const DEFAULT_INGREDIENT_GROUP: &str = "Ingredients";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub user_name: Option<String>,
    pub session_loading: bool,
    pub preview: Option<PreviewView>,
    pub preview_loading: bool,
    pub preview_error: Option<String>,
    pub recipes: Option<RecipePageView>,
    pub recipes_loading: bool,
    pub recipe: Option<RecipeView>,
    pub recipe_loading: bool,
    pub history: Vec<HistoryRowView>,
    pub history_loaded: bool,
    pub library: Vec<LibraryRowView>,
    pub library_loading: bool,
    pub confirmation_prompt: Option<String>,
    pub form_errors: Vec<(String, String)>,
    pub notices: Vec<Notice>,
    pub dirty: bool,
}

/// What the primary action for a video looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub label: String,
    pub enabled: bool,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub published_at: Option<String>,
    pub status: String,
    pub polling: PollingStatus,
    pub action: Option<ActionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRowView {
    pub slug: String,
    pub title: String,
    pub channel: Option<String>,
    pub cooking_time: Option<String>,
    pub dish: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePageView {
    pub rows: Vec<RecipeRowView>,
    pub page: u32,
    pub last_page: u32,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub slug: String,
    pub title: String,
    pub channel: Option<String>,
    pub cooking_time: Option<String>,
    pub serving_size: Option<String>,
    pub summary: Option<String>,
    pub ingredient_groups: Vec<(String, Vec<String>)>,
    pub steps: Vec<String>,
    pub tips: Vec<String>,
}

pub type HistoryRowView = RecipeRowView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRowView {
    pub video_id: String,
    pub title: String,
    pub status: String,
    pub action: Option<ActionView>,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState, dirty: bool) -> Self {
        let preview = state.preview.as_ref().map(|video| PreviewView {
            video_id: video.video_id.clone(),
            title: video.title.clone(),
            channel: video.channel.name.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
            duration: video.duration.map(format_timestamp),
            published_at: video.published_at.clone(),
            status: video.recipe_generation_status.as_str().to_string(),
            polling: state.polling,
            action: action_view(
                if state.polling.is_polling() {
                    ActionType::Processing
                } else {
                    video.action_type
                },
                video.recipe_slug.as_deref(),
                state.generating,
            ),
        });

        let recipes = state.recipes.as_ref().map(|page| {
            let (current, last, total) = match &page.meta {
                Some(meta) => (meta.current_page, meta.last_page, Some(meta.total)),
                None => (state.requested_page.max(1), state.requested_page.max(1), None),
            };
            RecipePageView {
                rows: page
                    .data
                    .iter()
                    .map(|recipe| RecipeRowView {
                        slug: recipe.slug.clone(),
                        title: recipe.title.clone(),
                        channel: recipe.channel_name.clone(),
                        cooking_time: recipe.cooking_time.clone(),
                        dish: recipe.dish.name.clone(),
                    })
                    .collect(),
                page: current,
                last_page: last,
                total,
            }
        });

        let history = state
            .history
            .iter()
            .map(|entry| RecipeRowView {
                slug: entry.slug.clone(),
                title: entry.title.clone(),
                channel: entry.channel_name.clone(),
                cooking_time: entry.cooking_time.clone(),
                dish: entry.dish.name.clone(),
            })
            .collect();

        let library = state
            .library
            .iter()
            .map(|video| LibraryRowView {
                video_id: video.video_id.clone(),
                title: video.title.clone(),
                status: video.recipe_generation_status.as_str().to_string(),
                action: action_view(
                    video.action_type,
                    video.recipe_slug.as_deref(),
                    state.library_generating.contains(&video.video_id),
                ),
            })
            .collect();

        let form_errors = state
            .form_errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |message| (field.clone(), message.clone()))
            })
            .collect();

        Self {
            screen: state.screen,
            user_name: state.session.user().map(|user| user.name.clone()),
            session_loading: state.session.is_loading(),
            preview,
            preview_loading: state.preview_loading,
            preview_error: state.preview_error.clone(),
            recipes,
            recipes_loading: state.recipes_loading,
            recipe: state.recipe.as_ref().map(recipe_view),
            recipe_loading: state.recipe_loading,
            history,
            history_loaded: state.history_loaded,
            library,
            library_loading: state.library_loading,
            confirmation_prompt: state
                .pending_confirmation
                .as_ref()
                .map(|pending| pending.prompt().to_string()),
            form_errors,
            notices: state.notices.clone(),
            dirty,
        }
    }
}

/// Maps the server's action discriminator to a user-facing action.
pub fn action_view(
    action: ActionType,
    recipe_slug: Option<&str>,
    generating: bool,
) -> Option<ActionView> {
    match action {
        ActionType::ViewRecipe => recipe_slug.map(|slug| ActionView {
            label: format!("View recipe (recipe {slug})"),
            enabled: true,
            hint: None,
        }),
        ActionType::Generate | ActionType::Retry if generating => Some(ActionView {
            label: "Generating...".to_string(),
            enabled: false,
            hint: None,
        }),
        ActionType::Generate => Some(ActionView {
            label: "Generate a recipe from this video".to_string(),
            enabled: true,
            hint: None,
        }),
        ActionType::Retry => Some(ActionView {
            label: "Retry recipe generation".to_string(),
            enabled: true,
            hint: Some("The previous attempt failed".to_string()),
        }),
        ActionType::Processing => Some(ActionView {
            label: "Generating...".to_string(),
            enabled: false,
            hint: Some("Checking progress every few seconds".to_string()),
        }),
        ActionType::LimitExceeded => Some(ActionView {
            label: "Cannot generate a recipe from this video".to_string(),
            enabled: false,
            hint: Some("Recipe generation failed; try another video".to_string()),
        }),
    }
}

fn recipe_view(recipe: &RecipeDetail) -> RecipeView {
    let mut steps: Vec<_> = recipe.steps.iter().collect();
    steps.sort_by_key(|step| step.step_number);
    RecipeView {
        slug: recipe.slug.clone(),
        title: recipe.title.clone(),
        channel: recipe.channel_name.clone(),
        cooking_time: recipe.cooking_time.clone(),
        serving_size: recipe.serving_size.clone(),
        summary: recipe.summary.clone(),
        ingredient_groups: group_ingredients(&recipe.ingredients)
            .into_iter()
            .map(|(group, items)| {
                let lines = items
                    .into_iter()
                    .map(|item| match item.quantity.as_deref() {
                        Some(quantity) => format!("{} {}", item.name, quantity),
                        None => item.name.clone(),
                    })
                    .collect();
                (group, lines)
            })
            .collect(),
        steps: steps
            .into_iter()
            .map(|step| match step.start_time_in_seconds {
                Some(start) => format!(
                    "{}. [{}] {}",
                    step.step_number,
                    format_timestamp(start),
                    step.description
                ),
                None => format!("{}. {}", step.step_number, step.description),
            })
            .collect(),
        tips: recipe
            .tips
            .iter()
            .map(|tip| match tip.start_time_in_seconds {
                Some(start) => format!("[{}] {}", format_timestamp(start), tip.description),
                None => tip.description.clone(),
            })
            .collect(),
    }
}

/// Groups ingredients by their `group`, in first-seen group order, each group
/// sorted by `order`.
pub fn group_ingredients(ingredients: &[Ingredient]) -> Vec<(String, Vec<&Ingredient>)> {
    let mut groups: Vec<(String, Vec<&Ingredient>)> = Vec::new();
    for ingredient in ingredients {
        let name = ingredient
            .group
            .as_deref()
            .filter(|group| !group.trim().is_empty())
            .unwrap_or(DEFAULT_INGREDIENT_GROUP);
        match groups.iter_mut().find(|(group, _)| group == name) {
            Some((_, items)) => items.push(ingredient),
            None => groups.push((name.to_string(), vec![ingredient])),
        }
    }
    for (_, items) in &mut groups {
        items.sort_by_key(|item| item.order);
    }
    groups
}

/// Seconds → `m:ss`.
pub fn format_timestamp(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

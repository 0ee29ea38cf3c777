//! Favorite search: the merged picker and the alias fast path

use crate::favorite::{Favorite, FileHandle};
use crate::host::{EditorHost, PickerEvent, PickerOptions, WorkspaceFolder};
use crate::open::OpenerRegistry;
use crate::store::{FavesStore, StoreUpdate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Separator between description parts
const DESCRIPTION_SEPARATOR: &str = " ● ";

/// A button attached to each picker item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemButton {
    pub id: &'static str,
    pub icon: &'static str,
    pub tooltip: &'static str,
}

/// Removes the item's favorite without closing the picker
pub const REMOVE_BUTTON: ItemButton = ItemButton {
    id: "remove",
    icon: "close",
    tooltip: "Remove file from favorites list",
};

/// One row of the picker
#[derive(Debug, Clone)]
pub struct PickerItem {
    pub label: String,
    pub description: String,
    /// Icon of the scope the favorite came from
    pub icon: &'static str,
    pub buttons: Vec<ItemButton>,
    pub favorite: Favorite,
    /// Resolved file to open
    pub location: FileHandle,
    /// Index of the owning store in the slice passed to [`search_faves`]
    pub store: usize,
}

/// How a search was invoked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Only list aliased favorites, labeled by alias
    pub use_alias: bool,
    /// Jump straight to the favorite with this alias
    pub alias: Option<String>,
}

impl SearchOptions {
    pub fn by_alias(alias: impl Into<String>) -> Self {
        Self {
            use_alias: true,
            alias: Some(alias.into()),
        }
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Opened(FileHandle),
    NoFavorites,
    NoSelection,
    MultipleSelections,
    Dismissed,
    /// An error was reported to the user
    Failed,
}

/// Search favorites across `stores`
///
/// Stores are consulted in slice order. With a literal alias the first
/// favorite carrying it wins and the picker is skipped.
pub async fn search_faves(
    host: &dyn EditorHost,
    stores: &mut [FavesStore],
    openers: &OpenerRegistry,
    options: &SearchOptions,
) -> SearchOutcome {
    if let Some(alias) = &options.alias {
        return jump_to_alias(host, stores, openers, alias.trim()).await;
    }

    let items = build_items(host, stores, options.use_alias).await;
    if items.is_empty() {
        host.info("No favorites exist for this workspace").await;
        return SearchOutcome::NoFavorites;
    }

    run_picker(host, stores, openers, items, options.use_alias).await
}

/// Build the merged, label-sorted item list
pub async fn build_items(
    host: &dyn EditorHost,
    stores: &[FavesStore],
    use_alias: bool,
) -> Vec<PickerItem> {
    let folders = host.workspace_folders();
    let mut items = Vec::new();

    for (store_index, store) in stores.iter().enumerate() {
        let scope = store.scope();
        for fave in store.ordered_faves() {
            let label = if use_alias {
                match fave.alias() {
                    Some(alias) => alias.to_string(),
                    None => continue,
                }
            } else {
                fave.basename()
            };

            for location in live_handles(host, store, fave).await {
                let folder = host.workspace_folder_for(location.path());
                let description =
                    describe(&folders, folder.as_ref(), fave, location.path(), use_alias);
                items.push(PickerItem {
                    label: label.clone(),
                    description,
                    icon: scope.icon(),
                    buttons: vec![REMOVE_BUTTON],
                    favorite: fave.clone(),
                    location,
                    store: store_index,
                });
            }
        }
    }

    items.sort_by(|a, b| a.label.cmp(&b.label));
    debug!("Built {} picker items", items.len());
    items
}

/// Resolved handles of `fave` that are existing regular files
async fn live_handles(host: &dyn EditorHost, store: &FavesStore, fave: &Favorite) -> Vec<FileHandle> {
    let mut live = Vec::new();
    for handle in store.scope().key_to_handles(host, fave).await {
        if host.is_regular_file(handle.path()).await {
            live.push(handle);
        } else {
            debug!("Skipping missing favorite {}", handle);
        }
    }
    live
}

fn describe(
    folders: &[WorkspaceFolder],
    folder: Option<&WorkspaceFolder>,
    fave: &Favorite,
    location: &Path,
    use_alias: bool,
) -> String {
    let mut parts = Vec::new();
    match folder {
        // Outside every root the stored path is all we can show
        None => parts.push(parent_display(Path::new(&fave.path))),
        Some(folder) => {
            if folders.len() != 1 {
                parts.push(folder.name.clone());
            }
            if let Ok(relative) = location.strip_prefix(&folder.path) {
                parts.push(parent_display(relative));
            }
        }
    }
    if use_alias {
        parts.push(fave.basename());
    }

    parts.retain(|part| !part.is_empty());
    parts.join(DESCRIPTION_SEPARATOR)
}

fn parent_display(path: &Path) -> String {
    path.parent()
        .map(|parent| parent.display().to_string())
        .unwrap_or_default()
}

async fn jump_to_alias(
    host: &dyn EditorHost,
    stores: &[FavesStore],
    openers: &OpenerRegistry,
    alias: &str,
) -> SearchOutcome {
    let found = stores.iter().find_map(|store| {
        store
            .ordered_faves()
            .into_iter()
            .find(|fave| fave.alias() == Some(alias))
            .map(|fave| (store, fave))
    });

    let Some((store, fave)) = found else {
        host.error(&format!("No favorite found with alias '{}'", alias))
            .await;
        return SearchOutcome::Failed;
    };

    let mut handles = live_handles(host, store, fave).await;
    match handles.len() {
        0 => {
            host.error(&format!("No file exists for alias '{}'", alias))
                .await;
            SearchOutcome::Failed
        }
        1 => {
            let location = handles.remove(0);
            open_item(host, openers, fave, location).await
        }
        count => {
            warn!("Alias '{}' resolved to {} files", alias, count);
            host.error(&format!("Multiple files exist for alias '{}'", alias))
                .await;
            SearchOutcome::Failed
        }
    }
}

enum Choice {
    Open(PickerItem),
    Done(SearchOutcome),
}

async fn run_picker(
    host: &dyn EditorHost,
    stores: &mut [FavesStore],
    openers: &OpenerRegistry,
    mut items: Vec<PickerItem>,
    use_alias: bool,
) -> SearchOutcome {
    let mut picker = host.create_quick_pick(PickerOptions {
        placeholder: "Search favorited files".to_string(),
        match_on_description: !use_alias,
    });

    let choice = loop {
        match picker.next_event(&items).await {
            PickerEvent::ButtonPressed { item, button } => {
                if button != REMOVE_BUTTON.id {
                    host.error("Unknown item button").await;
                    continue;
                }
                let Some(pressed) = items.get(item).cloned() else {
                    warn!("Button pressed on missing picker item {}", item);
                    continue;
                };

                let update = stores[pressed.store]
                    .remove_path(host, &pressed.favorite.path)
                    .await;
                if update == StoreUpdate::Failed {
                    // The store was reloaded and still holds the favorite
                    continue;
                }
                // A global favorite may be listed once per root
                items.retain(|other| {
                    other.store != pressed.store || other.favorite.path != pressed.favorite.path
                });
            }
            PickerEvent::Accepted { selected } => {
                break match selected.as_slice() {
                    [] => {
                        host.info("No selection made").await;
                        Choice::Done(SearchOutcome::NoSelection)
                    }
                    [index] => match items.get(*index) {
                        Some(item) => Choice::Open(item.clone()),
                        None => {
                            host.info("No selection made").await;
                            Choice::Done(SearchOutcome::NoSelection)
                        }
                    },
                    _ => {
                        host.info("Multiple selections made?!?!?").await;
                        Choice::Done(SearchOutcome::MultipleSelections)
                    }
                };
            }
            PickerEvent::Dismissed => break Choice::Done(SearchOutcome::Dismissed),
        }
    };

    picker.close().await;

    match choice {
        Choice::Open(item) => open_item(host, openers, &item.favorite, item.location).await,
        Choice::Done(outcome) => outcome,
    }
}

async fn open_item(
    host: &dyn EditorHost,
    openers: &OpenerRegistry,
    fave: &Favorite,
    location: FileHandle,
) -> SearchOutcome {
    match openers.open(host, fave.scheme.as_deref(), &location).await {
        Ok(()) => SearchOutcome::Opened(location),
        Err(e) => {
            host.error(&e.to_string()).await;
            SearchOutcome::Failed
        }
    }
}

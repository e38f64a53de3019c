use crate::audio::backend::AudioBackend;
use crate::config::PlaybackOpts;
use crate::foundation::error::{StoryError, StoryResult};
use crate::playback::controller::PlaybackController;
use crate::scene::model::{Choice, Project};
use crate::scene::variables::Variables;
use std::sync::Arc;
use std::time::Duration;

/// Result of selecting a choice in a project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The target scene was loaded and is playing.
    Navigated {
        /// Scene now playing.
        scene_id: String,
    },
    /// The choice names a scene the project does not have; the current scene stays.
    UnknownTarget {
        /// The missing scene id.
        scene_id: String,
    },
    /// The choice has no target scene.
    Stayed,
}

/// Plays a whole project: scene navigation plus the project-wide variable store.
#[derive(Debug)]
pub struct ProjectPlayer {
    project: Project,
    variables: Variables,
    controller: PlaybackController,
}

impl ProjectPlayer {
    /// Validate `project` and load its start scene.
    pub fn new(
        project: Project,
        backend: Box<dyn AudioBackend>,
        opts: PlaybackOpts,
    ) -> StoryResult<Self> {
        project.validate()?;
        let mut player = Self {
            variables: project.global_variables.clone(),
            controller: PlaybackController::new(backend, opts),
            project,
        };
        let start = player
            .project
            .start_scene()
            .map(|s| s.id.clone())
            .ok_or_else(|| StoryError::validation("project has no scenes"))?;
        player.enter(&start);
        Ok(player)
    }

    fn enter(&mut self, scene_id: &str) -> bool {
        let Some(scene) = self.project.scene(scene_id) else {
            return false;
        };
        // Scene-local defaults never override values already in the store.
        for (k, v) in &scene.variables {
            self.variables.entry(k.clone()).or_insert_with(|| v.clone());
        }
        // A fresh Arc per visit so revisiting a scene always restarts it.
        self.controller.load_scene(Arc::new(scene.clone()));
        true
    }

    /// Select a visible choice of the current scene and follow it.
    #[tracing::instrument(skip(self))]
    pub fn select_choice(&mut self, choice_id: &str) -> StoryResult<ChoiceOutcome> {
        let target = self.controller.select_choice(choice_id, &mut self.variables)?;
        let Some(scene_id) = target else {
            return Ok(ChoiceOutcome::Stayed);
        };
        if self.project.scene(&scene_id).is_none() {
            tracing::warn!(target_scene = %scene_id, "choice leads to an unknown scene; staying");
            return Ok(ChoiceOutcome::UnknownTarget { scene_id });
        }
        self.controller.pause();
        self.enter(&scene_id);
        self.controller.play();
        Ok(ChoiceOutcome::Navigated { scene_id })
    }

    /// Choices of the current scene visible under the current variables.
    pub fn visible_choices(&self) -> Vec<&Choice> {
        self.controller.visible_choices(&self.variables)
    }

    /// Feed host time to the controller.
    pub fn advance(&mut self, dt: Duration) {
        self.controller.advance(dt);
    }

    /// Id of the scene currently loaded.
    pub fn current_scene_id(&self) -> Option<&str> {
        self.controller.scene().map(|s| s.id.as_str())
    }

    /// The project-wide variable store.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Mutable access to the variable store for host-driven changes.
    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    /// The scene controller.
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Mutable scene controller, for transport operations.
    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    /// The project being played.
    pub fn project(&self) -> &Project {
        &self.project
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/project.rs"]
mod tests;

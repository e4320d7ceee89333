use gt_core::{ElementRef, Selector, TourError, View};
use gt_runtime::TourHost;
use serde::{Deserialize, Serialize};

pub(crate) const HEADER_ID: &str = "app-header";
pub(crate) const COURSE_ID_KEY: &str = "course-id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DemoCourse {
    pub(crate) id: String,
    pub(crate) title: String,
}

/// Simulated learning portal the tour runs on top of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DemoApp {
    view: View,
    notifications_open: bool,
    view_loads: u64,
    courses: Vec<DemoCourse>,
}

impl Default for DemoApp {
    fn default() -> Self {
        let course = |id: &str, title: &str| DemoCourse {
            id: id.to_string(),
            title: title.to_string(),
        };
        Self {
            view: View::Menu,
            notifications_open: false,
            view_loads: 0,
            courses: vec![
                course("c1", "Company onboarding"),
                course("c2", "Workplace safety"),
                course("c3", "Customer service basics"),
            ],
        }
    }
}

impl DemoApp {
    pub(crate) fn view(&self) -> &View {
        &self.view
    }

    pub(crate) fn notifications_open(&self) -> bool {
        self.notifications_open
    }

    pub(crate) fn view_loads(&self) -> u64 {
        self.view_loads
    }

    /// Every rendered element in document order: header first, then the current view.
    pub(crate) fn elements(&self) -> Vec<ElementRef> {
        let header_child = |id: &str| {
            ElementRef::new(id)
                .with_ancestors([HEADER_ID])
                .with_stacking_root(HEADER_ID)
        };

        let mut elements = vec![
            ElementRef::new(HEADER_ID),
            header_child("notifications-bell"),
            header_child("profile-btn"),
        ];
        if self.view != View::Menu {
            elements.push(header_child("back-to-menu-btn"));
        }
        if self.notifications_open {
            elements.push(
                ElementRef::new("notifications-panel")
                    .with_ancestors(["notifications-bell", HEADER_ID])
                    .with_stacking_root(HEADER_ID),
            );
        }

        match &self.view {
            View::Menu => {
                elements.push(ElementRef::new("main-menu-tabs"));
                elements.push(ElementRef::new("main-menu"));
                for course in &self.courses {
                    let card = ElementRef::new(format!("course-{}", course.id))
                        .with_class("course-card")
                        .with_ancestors(["main-menu"])
                        .with_data(COURSE_ID_KEY, course.id.clone());
                    let open = ElementRef::new(format!("course-{}-open", course.id))
                        .with_class("course-open")
                        .within(&card);
                    elements.push(card);
                    elements.push(open);
                }
                elements.push(
                    ElementRef::new("progress-link")
                        .with_class("profile-link")
                        .with_ancestors(["main-menu"]),
                );
            }
            View::Profile => elements.push(ElementRef::new("profile-stats")),
            View::Presentation { .. } => elements.push(ElementRef::new("presentation-controls")),
        }
        elements
    }

    pub(crate) fn element(&self, id: &str) -> Option<ElementRef> {
        self.elements().into_iter().find(|element| element.id == id)
    }

    pub(crate) fn label(&self, element: &ElementRef) -> String {
        match element.id.as_str() {
            HEADER_ID => "Learning portal".to_string(),
            "notifications-bell" => "Notifications".to_string(),
            "notifications-panel" => "No new notifications".to_string(),
            "profile-btn" => "Profile".to_string(),
            "back-to-menu-btn" => "Back to menu".to_string(),
            "main-menu-tabs" => "Assigned | Completed | Catalog".to_string(),
            "main-menu" => "Course list".to_string(),
            "progress-link" => "My progress".to_string(),
            "profile-stats" => "Assigned: 3  Completed: 0  Average score: -".to_string(),
            "presentation-controls" => match &self.view {
                View::Presentation { course_id } => {
                    format!("{} | prev | play | next", self.course_title(course_id))
                }
                _ => "prev | play | next".to_string(),
            },
            _ if element.classes.iter().any(|class| class == "course-open") => {
                "Open course".to_string()
            }
            _ => element
                .dataset
                .get(COURSE_ID_KEY)
                .map(|course_id| self.course_title(course_id))
                .unwrap_or_else(|| element.id.clone()),
        }
    }

    fn course_title(&self, course_id: &str) -> String {
        self.courses
            .iter()
            .find(|course| course.id == course_id)
            .map(|course| course.title.clone())
            .unwrap_or_else(|| course_id.to_string())
    }

    /// What the portal itself does when `element` is clicked.
    pub(crate) fn run_default_action(&mut self, element: &ElementRef) -> Result<(), TourError> {
        match element.id.as_str() {
            "notifications-bell" => {
                self.notifications_open = !self.notifications_open;
                Ok(())
            }
            "profile-btn" | "progress-link" => self.show_view(&View::Profile),
            "back-to-menu-btn" => self.show_view(&View::Menu),
            _ => match element.inherited_data(COURSE_ID_KEY) {
                Some(course_id) => self.show_view(&View::Presentation {
                    course_id: course_id.to_string(),
                }),
                None => Ok(()),
            },
        }
    }
}

impl TourHost for DemoApp {
    fn resolve(&self, selector: &Selector) -> Option<ElementRef> {
        self.elements()
            .into_iter()
            .find(|element| element.matches(selector))
    }

    fn current_view(&self) -> Option<View> {
        Some(self.view.clone())
    }

    fn show_view(&mut self, view: &View) -> Result<(), TourError> {
        if let View::Presentation { course_id } = view {
            if !self.courses.iter().any(|course| &course.id == course_id) {
                return Err(TourError::new(
                    "APP_COURSE_UNKNOWN",
                    format!("Course \"{}\" does not exist.", course_id),
                ));
            }
        }
        self.view = view.clone();
        self.notifications_open = false;
        self.view_loads += 1;
        Ok(())
    }
}

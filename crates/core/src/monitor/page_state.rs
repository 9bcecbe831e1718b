use crate::detection::domain::detection_list::DetectionList;

/// Everything a front end needs to draw the monitoring page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub feed_visible: bool,
    pub placeholder_visible: bool,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub alert_visible: bool,
    pub name_input: String,
    pub detections: DetectionList,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            feed_visible: false,
            placeholder_visible: true,
            start_enabled: true,
            stop_enabled: false,
            alert_visible: false,
            name_input: String::new(),
            detections: DetectionList::Empty,
        }
    }
}

impl PageState {
    pub(crate) fn show_camera_running(&mut self, running: bool) {
        self.feed_visible = running;
        self.placeholder_visible = !running;
        self.start_enabled = !running;
        self.stop_enabled = running;
    }
}

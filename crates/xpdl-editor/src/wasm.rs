//! WebAssembly bindings for the editor
//!
//! Exposes an [`EditorSession`] to a browser front end. Entities cross the
//! boundary as JSON strings in the snapshot shape; failures become thrown
//! JavaScript errors whose message starts with the error's message key, so
//! the UI can look up its localized text.

use wasm_bindgen::prelude::*;

use crate::core::{
    ActivityNode, ActivityType, Actor, CommentNode, EditorConfig, EditorError, ProcessDetail,
    ProjectDetail, SelectMode,
};
use crate::model::EditorSession;
use crate::{project_from_json, project_to_json};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn editor_error(error: EditorError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", error.kind().message_key(), error))
}

fn json_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("Invalid JSON: {}", error))
}

fn from_json<T: serde::de::DeserializeOwned>(input: &str) -> Result<T, JsValue> {
    serde_json::from_str(input).map_err(json_error)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(json_error)
}

fn select_mode(mode: &str) -> Result<SelectMode, JsValue> {
    match mode {
        "select" => Ok(SelectMode::Select),
        "toggle" => Ok(SelectMode::Toggle),
        "clearAll" => Ok(SelectMode::ClearAll),
        _ => Err(JsValue::from_str(&format!(
            "Unknown select mode: {}. Use 'select', 'toggle', or 'clearAll'",
            mode
        ))),
    }
}

/// Editor session handle for JavaScript
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Start with a fresh project
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEditor {
        WasmEditor {
            session: EditorSession::with_config(EditorConfig::default()),
        }
    }

    /// Change counter for redraw decisions
    pub fn revision(&self) -> f64 {
        self.session.revision() as f64
    }

    #[wasm_bindgen(js_name = loadProject)]
    pub fn load_project(&mut self, json: &str) -> Result<(), JsValue> {
        let project = project_from_json(json).map_err(json_error)?;
        self.session.load_project(&project).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = saveProject)]
    pub fn save_project(&mut self) -> Result<String, JsValue> {
        let project = self.session.save_project();
        project_to_json(&project).map_err(json_error)
    }

    #[wasm_bindgen(js_name = initAll)]
    pub fn init_all(&mut self) {
        self.session.init_all(chrono::Utc::now());
    }

    #[wasm_bindgen(js_name = updateProjectDetail)]
    pub fn update_project_detail(&mut self, json: &str) -> Result<(), JsValue> {
        let detail: ProjectDetail = from_json(json)?;
        self.session.update_project_detail(&detail);
        Ok(())
    }

    /// Live diagram of the selected process as `{actors, nodes, edges}`
    pub fn diagram(&self) -> Result<String, JsValue> {
        let diagram = self.session.diagram();
        to_json(&serde_json::json!({
            "processId": self.session.registry().selected_id(),
            "actors": diagram.actors().as_slice(),
            "nodes": diagram.nodes().as_slice(),
            "edges": diagram.edges().as_slice(),
        }))
    }

    #[wasm_bindgen(js_name = changeProcess)]
    pub fn change_process(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.change_process(id).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addProcess)]
    pub fn add_process(&mut self) -> Result<u32, JsValue> {
        self.session
            .add_process(chrono::Utc::now())
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = removeProcess)]
    pub fn remove_process(&mut self, id: u32) -> Result<bool, JsValue> {
        self.session.remove_process(id).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = updateProcessDetail)]
    pub fn update_process_detail(&mut self, id: u32, json: &str) -> Result<(), JsValue> {
        let detail: ProcessDetail = from_json(json)?;
        self.session
            .update_process_detail(id, &detail)
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addActor)]
    pub fn add_actor(&mut self) -> Result<String, JsValue> {
        let actor = self.session.add_actor().map_err(editor_error)?;
        to_json(&actor)
    }

    #[wasm_bindgen(js_name = updateActor)]
    pub fn update_actor(&mut self, json: &str) -> Result<(), JsValue> {
        let actor: Actor = from_json(json)?;
        self.session.update_actor(&actor).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = removeActor)]
    pub fn remove_actor(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.remove_actor(id).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addActivity)]
    pub fn add_activity(&mut self, activity_type: &str, cx: f64, cy: f64) -> Result<String, JsValue> {
        let activity_type: ActivityType = from_json(&format!("\"{}\"", activity_type))?;
        let activity = self
            .session
            .add_activity(activity_type, cx, cy)
            .map_err(editor_error)?;
        to_json(&activity)
    }

    #[wasm_bindgen(js_name = updateActivity)]
    pub fn update_activity(&mut self, json: &str) -> Result<(), JsValue> {
        let patch: ActivityNode = from_json(json)?;
        self.session.update_activity(&patch).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = updateComment)]
    pub fn update_comment(&mut self, json: &str) -> Result<(), JsValue> {
        let patch: CommentNode = from_json(json)?;
        self.session.update_comment(&patch).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addCommentNode)]
    pub fn add_comment_node(&mut self, x: f64, y: f64) -> Result<u32, JsValue> {
        self.session.add_comment_node(x, y).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addStartNode)]
    pub fn add_start_node(&mut self, x: f64, y: f64) -> Result<u32, JsValue> {
        self.session.add_start_node(x, y).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addEndNode)]
    pub fn add_end_node(&mut self, x: f64, y: f64) -> Result<u32, JsValue> {
        self.session.add_end_node(x, y).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = resizeActivityHeight)]
    pub fn resize_activity_height(&mut self, id: u32, height: f64) -> Result<bool, JsValue> {
        self.session
            .resize_activity_height(id, height)
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = resizeComment)]
    pub fn resize_comment(&mut self, id: u32, width: f64, height: f64) -> Result<(), JsValue> {
        self.session
            .resize_comment(id, width, height)
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = resizeLeft)]
    pub fn resize_left(&mut self, dx: f64) -> u32 {
        self.session.resize_left(dx) as u32
    }

    #[wasm_bindgen(js_name = resizeRight)]
    pub fn resize_right(&mut self, dx: f64) -> u32 {
        self.session.resize_right(dx) as u32
    }

    #[wasm_bindgen(js_name = layerTop)]
    pub fn layer_top(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.layer_top(id).map_err(editor_error)
    }

    /// Drag the selection; returns the applied `[dx, dy]`
    #[wasm_bindgen(js_name = moveSelectedNodes)]
    pub fn move_selected_nodes(&mut self, dx: f64, dy: f64) -> Vec<f64> {
        let (dx, dy) = self.session.move_selected_nodes(dx, dy);
        vec![dx, dy]
    }

    /// Returns the new edge id, or undefined when nothing was created
    #[wasm_bindgen(js_name = addTransition)]
    pub fn add_transition(&mut self, from: u32, to: u32) -> Result<Option<u32>, JsValue> {
        self.session.add_transition(from, to).map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addCommentEdge)]
    pub fn add_comment_edge(&mut self, comment_id: u32, to: u32) -> Result<u32, JsValue> {
        self.session
            .add_comment_edge(comment_id, to)
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addStartEdge)]
    pub fn add_start_edge(&mut self, start_id: u32, activity_id: u32) -> Result<u32, JsValue> {
        self.session
            .add_start_edge(start_id, activity_id)
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = addEndEdge)]
    pub fn add_end_edge(&mut self, activity_id: u32, end_id: u32) -> Result<u32, JsValue> {
        self.session
            .add_end_edge(activity_id, end_id)
            .map_err(editor_error)
    }

    #[wasm_bindgen(js_name = removeSelected)]
    pub fn remove_selected(&mut self) {
        self.session.remove_selected();
    }

    #[wasm_bindgen(js_name = changeSelectNodes)]
    pub fn change_select_nodes(&mut self, mode: &str, ids: Vec<u32>) -> Result<(), JsValue> {
        let mode = select_mode(mode)?;
        self.session.change_select_nodes(mode, &ids);
        Ok(())
    }

    #[wasm_bindgen(js_name = changeSelectEdges)]
    pub fn change_select_edges(&mut self, mode: &str, ids: Vec<u32>) -> Result<(), JsValue> {
        let mode = select_mode(mode)?;
        self.session.change_select_edges(mode, &ids);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.session.select_all();
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

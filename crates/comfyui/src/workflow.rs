//! Wan2.2 workflow graph builders.
//!
//! A workflow is a list of typed nodes plus the links wiring node
//! outputs to downstream inputs. The graphs here are the minimal shapes
//! the generation endpoints need; node inputs that reference another
//! node carry that node's string ID.

use serde::Serialize;
use serde_json::json;

/// A single node in a workflow graph.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub inputs: serde_json::Value,
}

/// A link wiring one node's output into another node's input:
/// `(order, source node type, output name, (target node id, input name))`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowLink(
    pub u32,
    pub &'static str,
    pub &'static str,
    pub (String, &'static str),
);

/// A complete workflow graph ready for submission.
#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
    pub nodes: Vec<WorkflowNode>,
    pub links: Vec<WorkflowLink>,
}

/// Image-to-video: load a still reference image and animate it from a
/// text prompt.
pub fn image_to_video(image_url: &str, prompt: &str) -> Workflow {
    Workflow {
        nodes: vec![
            WorkflowNode {
                id: "1".to_string(),
                node_type: "LoadImage".to_string(),
                inputs: json!({ "image": image_url }),
            },
            WorkflowNode {
                id: "2".to_string(),
                node_type: "WanImageToVideo".to_string(),
                inputs: json!({ "image": "1", "prompt": prompt }),
            },
        ],
        links: vec![WorkflowLink(1, "LoadImage", "IMAGE", ("2".to_string(), "image"))],
    }
}

/// Lip-sync: drive a character reference image with a speech audio track.
pub fn lip_sync(image_url: &str, audio_url: &str, prompt: Option<&str>) -> Workflow {
    Workflow {
        nodes: vec![
            WorkflowNode {
                id: "1".to_string(),
                node_type: "LoadImage".to_string(),
                inputs: json!({ "image": image_url }),
            },
            WorkflowNode {
                id: "2".to_string(),
                node_type: "LoadAudio".to_string(),
                inputs: json!({ "audio": audio_url }),
            },
            WorkflowNode {
                id: "3".to_string(),
                node_type: "WanLipSync".to_string(),
                inputs: json!({
                    "image": "1",
                    "audio": "2",
                    "prompt": prompt.unwrap_or(""),
                }),
            },
        ],
        links: vec![
            WorkflowLink(1, "LoadImage", "IMAGE", ("3".to_string(), "image")),
            WorkflowLink(2, "LoadAudio", "AUDIO", ("3".to_string(), "audio")),
        ],
    }
}

/// First-last-frame: interpolate a clip between two keyframe images.
pub fn first_last_frame(first_frame_url: &str, last_frame_url: &str, prompt: &str) -> Workflow {
    Workflow {
        nodes: vec![
            WorkflowNode {
                id: "1".to_string(),
                node_type: "LoadImage".to_string(),
                inputs: json!({ "image": first_frame_url }),
            },
            WorkflowNode {
                id: "2".to_string(),
                node_type: "LoadImage".to_string(),
                inputs: json!({ "image": last_frame_url }),
            },
            WorkflowNode {
                id: "3".to_string(),
                node_type: "WanFirstLastFrame".to_string(),
                inputs: json!({
                    "first_frame": "1",
                    "last_frame": "2",
                    "prompt": prompt,
                }),
            },
        ],
        links: vec![
            WorkflowLink(1, "LoadImage", "IMAGE", ("3".to_string(), "first_frame")),
            WorkflowLink(2, "LoadImage", "IMAGE", ("3".to_string(), "last_frame")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_to_video_shape() {
        let workflow = image_to_video("/img/char.png", "walks across the rooftop");
        assert_eq!(workflow.nodes.len(), 2);
        assert_eq!(workflow.nodes[1].node_type, "WanImageToVideo");
        assert_eq!(workflow.links.len(), 1);

        let serialized = serde_json::to_value(&workflow).unwrap();
        assert_eq!(serialized["nodes"][0]["type"], "LoadImage");
        assert_eq!(serialized["nodes"][0]["inputs"]["image"], "/img/char.png");
        // Links serialize as [order, source type, output, [target id, input]].
        assert_eq!(
            serialized["links"][0],
            serde_json::json!([1, "LoadImage", "IMAGE", ["2", "image"]])
        );
    }

    #[test]
    fn lip_sync_wires_image_and_audio() {
        let workflow = lip_sync("/img/char.png", "/uploads/audio/tts_1.mp3", None);
        assert_eq!(workflow.nodes.len(), 3);
        assert_eq!(workflow.nodes[2].node_type, "WanLipSync");
        assert_eq!(workflow.nodes[2].inputs["prompt"], "");
        assert_eq!(workflow.links.len(), 2);
    }

    #[test]
    fn lip_sync_carries_optional_prompt() {
        let workflow = lip_sync("/img/char.png", "/a.mp3", Some("speaking softly"));
        assert_eq!(workflow.nodes[2].inputs["prompt"], "speaking softly");
    }

    #[test]
    fn first_last_frame_uses_two_keyframes() {
        let workflow = first_last_frame("/img/a.png", "/img/b.png", "slow pan");
        assert_eq!(workflow.nodes.len(), 3);
        assert_eq!(workflow.nodes[2].node_type, "WanFirstLastFrame");
        assert_eq!(workflow.nodes[2].inputs["first_frame"], "1");
        assert_eq!(workflow.nodes[2].inputs["last_frame"], "2");
    }
}

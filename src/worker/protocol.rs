// JSON envelopes exchanged with the search worker.
// Requests are `{ "id": 1, "type": "go", "payload": { ... } }`, replies are
// `{ "id": 1, "type": "bestmove", ...fields }`. The same types travel over
// the in-process channels and the stdio JSON-lines mode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movetime: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PositionPayload {
    fen: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct OptionPayload {
    name: String,
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init,
    SetPosition { fen: String },
    Go(GoParams),
    Stop,
    SetOption { name: String, value: Value },
    /// A known command whose payload did not decode.
    Malformed { kind: String, reason: String },
    Unknown(String),
}

impl Command {
    pub fn kind(&self) -> &str {
        match self {
            Command::Init => "init",
            Command::SetPosition { .. } => "setPosition",
            Command::Go(_) => "go",
            Command::Stop => "stop",
            Command::SetOption { .. } => "setOption",
            Command::Malformed { kind, .. } => kind.as_str(),
            Command::Unknown(kind) => kind.as_str(),
        }
    }

    fn payload(&self) -> Option<Value> {
        match self {
            Command::SetPosition { fen } => serde_json::to_value(PositionPayload { fen: fen.clone() }).ok(),
            Command::Go(p) => serde_json::to_value(p).ok(),
            Command::SetOption { name, value } => {
                serde_json::to_value(OptionPayload { name: name.clone(), value: value.clone() }).ok()
            }
            _ => None,
        }
    }

    fn decode(kind: String, payload: Option<Value>) -> Command {
        fn parse<T: serde::de::DeserializeOwned>(payload: Option<Value>) -> Result<T, serde_json::Error> {
            serde_json::from_value(payload.unwrap_or_else(|| Value::Object(Default::default())))
        }
        let decoded = match kind.as_str() {
            "init" => Ok(Command::Init),
            "stop" => Ok(Command::Stop),
            "setPosition" => parse::<PositionPayload>(payload).map(|p| Command::SetPosition { fen: p.fen }).map_err(Some),
            "go" => parse::<GoParams>(payload).map(Command::Go).map_err(Some),
            "setOption" => parse::<OptionPayload>(payload).map(|p| Command::SetOption { name: p.name, value: p.value }).map_err(Some),
            _ => Err(None),
        };
        match decoded {
            Ok(cmd) => cmd,
            Err(Some(e)) => Command::Malformed { kind, reason: e.to_string() },
            Err(None) => Command::Unknown(kind),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawRequest {
    id: u64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRequest", into = "RawRequest")]
pub struct WorkerRequest {
    pub id: u64,
    pub command: Command,
}

impl From<RawRequest> for WorkerRequest {
    fn from(raw: RawRequest) -> Self {
        WorkerRequest { id: raw.id, command: Command::decode(raw.kind, raw.payload) }
    }
}

impl From<WorkerRequest> for RawRequest {
    fn from(req: WorkerRequest) -> Self {
        RawRequest { id: req.id, kind: req.command.kind().to_string(), payload: req.command.payload() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReplyBody {
    #[serde(rename = "inited")]
    Inited,
    #[serde(rename = "ok")]
    Ack,
    #[serde(rename = "bestmove")]
    BestMove {
        bestmove: Option<String>,
        depth: u32,
        #[serde(rename = "timeMs")]
        time_ms: u64,
        #[serde(default)]
        nodes: u64,
    },
    #[serde(rename = "stopped")]
    Stopped,
    #[serde(rename = "error")]
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReply {
    pub id: u64,
    #[serde(flatten)]
    pub body: ReplyBody,
}

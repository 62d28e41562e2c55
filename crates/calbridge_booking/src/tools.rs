// --- File: crates/calbridge_booking/src/tools.rs ---
//! Static tool descriptors advertised to calling agents.
//!
//! Agents cache these documents, so their content must not change between
//! calls. Both are built once and served from memory.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

pub const TOOL_NAME: &str = "schedule_meeting";

/// `GET /`: MCP manifest using the `parameters` convention.
pub static MCP_MANIFEST: Lazy<Value> = Lazy::new(|| {
    json!({
        "mcp": "1.0",
        "tools": [
            {
                "name": TOOL_NAME,
                "description": "Schedules a meeting in Cal.com using a name, email, and natural language date.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Full name of attendee"
                        },
                        "email": {
                            "type": "string",
                            "description": "Email of attendee"
                        },
                        "time": {
                            "type": "string",
                            "description": "Natural language time (e.g., 'next Monday at 3pm')"
                        },
                        "duration": {
                            "type": "integer",
                            "description": "Meeting duration in minutes",
                            "default": 30
                        },
                        "timezone": {
                            "type": "string",
                            "description": "Timezone (e.g., 'Europe/Amsterdam', 'Europe/Kyiv', 'America/New_York'). MUST match your Cal.com account timezone setting.",
                            "default": "Europe/Amsterdam"
                        }
                    },
                    "required": ["name", "email", "time"]
                }
            }
        ]
    })
});

/// `GET /tools`: tool list using the `input_schema` convention.
pub static TOOL_LIST: Lazy<Value> = Lazy::new(|| {
    json!({
        "tools": [
            {
                "name": TOOL_NAME,
                "description": "Schedules a call on Cal.com given a name, email, and time string.",
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Full name of the attendee"
                        },
                        "email": {
                            "type": "string",
                            "description": "Email address of the attendee"
                        },
                        "time": {
                            "type": "string",
                            "description": "Natural language date/time (e.g. 'next Monday at 3pm')"
                        },
                        "timezone": {
                            "type": "string",
                            "description": "Timezone (e.g., 'Europe/Kyiv', 'America/New_York')"
                        }
                    },
                    "required": ["name", "email", "time"]
                }
            }
        ]
    })
});

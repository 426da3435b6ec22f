use serde::Serialize;

/// Who answered the walk, judged by the sysObjectID enterprise arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentInfo {
    pub agent_type: String,
    pub description: String,
}

const ENTERPRISES: &[(&str, &str, &str)] = &[
    ("1.3.6.1.4.1.8072.", "linux", "Linux Net-SNMP Agent"),
    ("1.3.6.1.4.1.6027.", "force10", "Dell Force10 Device"),
    ("1.3.6.1.4.1.674.", "dell", "Dell Device"),
    ("1.3.6.1.4.1.33049.", "mellanox", "Mellanox Device"),
    ("1.3.6.1.4.1.30065.", "arista", "Arista Device"),
    ("1.3.6.1.4.1.9.", "cisco", "Cisco Device"),
    ("1.3.6.1.4.1.2636.", "juniper", "Juniper Device"),
];

pub struct AgentDetector;

impl AgentDetector {
    /// Classifies an agent from its sysObjectID. Accepts the `iso.` form too.
    pub fn detect(sys_object_id: &str) -> AgentInfo {
        let numeric = match sys_object_id.trim().strip_prefix("iso.") {
            Some(rest) => format!("1.{}", rest),
            None => sys_object_id.trim().trim_start_matches('.').to_string(),
        };

        ENTERPRISES
            .iter()
            .find(|(prefix, _, _)| numeric.starts_with(prefix))
            .map(|(_, agent_type, description)| AgentInfo {
                agent_type: agent_type.to_string(),
                description: description.to_string(),
            })
            .unwrap_or_else(|| AgentInfo {
                agent_type: "generic".to_string(),
                description: "Unknown Device".to_string(),
            })
    }
}

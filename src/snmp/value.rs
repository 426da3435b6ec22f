use snmp2::Value;

/// Renders a varbind value as the plain string a walk result stores.
pub fn render_value(value: &Value<'_>) -> String {
    match value {
        Value::OctetString(bytes) => String::from_utf8_lossy(bytes)
            .trim_end_matches('\0')
            .to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Counter32(n) | Value::Unsigned32(n) | Value::Timeticks(n) => n.to_string(),
        Value::Counter64(n) => n.to_string(),
        Value::ObjectIdentifier(oid) => oid.to_string(),
        Value::IpAddress(octets) => format!(
            "{}.{}.{}.{}",
            octets[0], octets[1], octets[2], octets[3]
        ),
        Value::Boolean(b) => b.to_string(),
        Value::Null => String::new(),
        other => format!("{:?}", other),
    }
}

/// True for the v2c exception values that terminate or void a varbind.
pub fn is_exception(value: &Value<'_>) -> bool {
    matches!(
        value,
        Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance
    )
}

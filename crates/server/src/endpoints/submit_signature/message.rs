//! 署名通知メールの件名・本文・宛先の組み立て。

use docsign_types::NewSignatureRecord;

/// 任意項目が未指定の場合の表記
pub(crate) const NOT_INFORMED: &str = "não informado";

/// 宛先一覧。運用者アドレスは常に先頭に含まれる。
pub(crate) fn recipients(operator_address: &str, client_email: Option<&str>) -> Vec<String> {
    let mut to = vec![operator_address.to_string()];
    if let Some(email) = client_email {
        to.push(email.to_string());
    }
    to
}

/// 件名。署名IDがある場合は末尾に付与する。
pub(crate) fn subject(client_name: &str, signature_id: Option<&str>) -> String {
    match signature_id {
        Some(id) => format!("Documento assinado - {client_name} - {id}"),
        None => format!("Documento assinado - {client_name}"),
    }
}

/// プレーンテキスト本文。
pub(crate) fn body(record: &NewSignatureRecord) -> String {
    let or_placeholder = |value: &Option<String>| -> String {
        value.clone().unwrap_or_else(|| NOT_INFORMED.to_string())
    };
    let geo = match &record.geo {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => NOT_INFORMED.to_string(),
    };

    format!(
        "Documento assinado eletronicamente.
Dados principais:
- ID da assinatura: {id}
- Nome: {name}
- CPF: {cpf}
- Endereço: {address}
- Doc. identidade: {document}
- Nacionalidade: {nationality}
- Estado civil: {marital_status}
- Profissão: {profession}
- E-mail do cliente: {email}
- Data/hora: {timestamp}
- Hash SHA-256: {hash}
- Geolocalização: {geo}
",
        id = or_placeholder(&record.signature_id),
        name = record.client_name,
        cpf = or_placeholder(&record.cpf),
        address = or_placeholder(&record.address),
        document = or_placeholder(&record.identity_document),
        nationality = or_placeholder(&record.nationality),
        marital_status = or_placeholder(&record.marital_status),
        profession = or_placeholder(&record.profession),
        email = or_placeholder(&record.client_email),
        timestamp = record.timestamp,
        hash = record.hash,
        geo = geo,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> NewSignatureRecord {
        NewSignatureRecord {
            hash: "abc123".to_string(),
            client_name: "Ana Silva".to_string(),
            timestamp: "2024-01-01T10:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_recipients() {
        assert_eq!(recipients("ops@example.com", None), vec!["ops@example.com"]);
        assert_eq!(
            recipients("ops@example.com", Some("ana@example.com")),
            vec!["ops@example.com", "ana@example.com"]
        );
    }

    #[test]
    fn test_subject() {
        assert_eq!(subject("Ana Silva", None), "Documento assinado - Ana Silva");
        assert_eq!(
            subject("Ana Silva", Some("SIG-7")),
            "Documento assinado - Ana Silva - SIG-7"
        );
    }

    /// 未指定の任意項目がすべてプレースホルダで埋まることを確認
    #[test]
    fn test_body_placeholders() {
        let text = body(&minimal());

        assert!(text.starts_with("Documento assinado eletronicamente.\n"));
        assert!(text.contains("- Nome: Ana Silva\n"));
        assert!(text.contains("- Hash SHA-256: abc123\n"));
        assert!(text.contains("- Data/hora: 2024-01-01T10:00:00Z\n"));
        assert!(text.contains("- ID da assinatura: não informado\n"));
        assert!(text.contains("- E-mail do cliente: não informado\n"));
        assert_eq!(text.matches(NOT_INFORMED).count(), 9);
    }

    #[test]
    fn test_body_with_fields() {
        let mut record = minimal();
        record.signature_id = Some("SIG-7".to_string());
        record.cpf = Some("123.456.789-00".to_string());
        record.profession = Some("Engenheira".to_string());
        record.geo = Some(serde_json::json!({"lat": -23.5}));

        let text = body(&record);
        assert!(text.contains("- ID da assinatura: SIG-7\n"));
        assert!(text.contains("- CPF: 123.456.789-00\n"));
        assert!(text.contains("- Profissão: Engenheira\n"));
        assert!(text.contains(r#"- Geolocalização: {"lat":-23.5}"#));
    }

    #[test]
    fn test_body_geo_string_is_unquoted() {
        let mut record = minimal();
        record.geo = Some(serde_json::json!("-23.5,-46.6"));
        assert!(body(&record).contains("- Geolocalização: -23.5,-46.6\n"));
    }
}

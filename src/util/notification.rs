use crate::model::{QuoteSubmission, UploadedFile};

/// Subject line of every quote notification
pub const QUOTE_SUBJECT: &str = "Nueva solicitud de cotización - NOVAFORTE";

const COMPANY_NAME: &str = "NOVAFORTE Ingeniería Biomédica";
const COMPANY_LOCATION: &str = "Bogotá, Colombia";
const COMPANY_PHONE: &str = "+57 000 000 0000";
const COMPANY_EMAIL: &str = "contacto@novafortesas.com";
const COMPANY_WEBSITE: &str = "https://www.novafortesas.com";

const PRIVACY_ACCEPTED_COLOR: &str = "#2e7d32";
const PRIVACY_REJECTED_COLOR: &str = "#c62828";

/// Escaped field value, or the fallback when absent or blank.
fn escaped_or(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref().filter(|v| !v.is_empty()) {
        Some(v) => html_escape::encode_text(v).into_owned(),
        None => fallback.to_string(),
    }
}

/// The raw privacy flag counts as accepted only for "true" or "on".
fn privacy_accepted(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("true") | Some("on"))
}

/// Attachment size rounded to the nearest kilobyte.
fn kilobytes(size: u64) -> u64 {
    (size as f64 / 1024.0).round() as u64
}

fn attachments_html(files: &[UploadedFile]) -> String {
    if files.is_empty() {
        return r#"<p style="margin: 0;">No se adjuntaron archivos 3D.</p>"#.to_string();
    }
    let items: String = files
        .iter()
        .map(|file| {
            format!(
                "<li>{} ({} KB)</li>",
                html_escape::encode_text(&file.original_name),
                kilobytes(file.size)
            )
        })
        .collect();
    format!(r#"<ul style="margin: 8px 0 0; padding-left: 18px;">{}</ul>"#, items)
}

/// Render the notification email body for one quote submission.
///
/// Pure string templating over the submitted fields: absent values fall
/// back to placeholder text, attachments render as a bulleted list and the
/// privacy flag gets a color cue. No side effects.
pub fn quote_notification_html(submission: &QuoteSubmission) -> String {
    let privacy_color = if privacy_accepted(&submission.privacy_accepted) {
        PRIVACY_ACCEPTED_COLOR
    } else {
        PRIVACY_REJECTED_COLOR
    };

    format!(
        r#"<div style="font-family: Arial, Helvetica, sans-serif; background-color: #f5f5f5; padding: 24px;">
  <div style="max-width: 640px; margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 4px 10px rgba(0,0,0,0.06);">

    <div style="background-color: #8c0507; color: #ffffff; padding: 16px 24px;">
      <h1 style="margin: 0; font-size: 20px;">Nueva solicitud de cotización</h1>
      <p style="margin: 4px 0 0; font-size: 13px;">{company_name} · Impresión 3D para el sector salud</p>
    </div>

    <div style="padding: 24px;">
      <p style="margin-top: 0; font-size: 14px; color: #303030;">
        Has recibido una nueva solicitud de cotización desde el sitio web.
      </p>

      <h2 style="font-size: 16px; margin: 16px 0 8px; color: #303030;">Datos del cliente</h2>
      <table style="width: 100%; border-collapse: collapse; font-size: 14px;">
        <tbody>
          <tr>
            <td style="padding: 6px 0; width: 35%; color: #555;"><strong>Nombre</strong></td>
            <td style="padding: 6px 0; color: #111;">{name}</td>
          </tr>
          <tr>
            <td style="padding: 6px 0; color: #555;"><strong>Email</strong></td>
            <td style="padding: 6px 0; color: #111;">{email}</td>
          </tr>
          <tr>
            <td style="padding: 6px 0; color: #555;"><strong>Teléfono</strong></td>
            <td style="padding: 6px 0; color: #111;">{phone}</td>
          </tr>
          <tr>
            <td style="padding: 6px 0; color: #555;"><strong>Tipo de cliente</strong></td>
            <td style="padding: 6px 0; color: #111;">{client_type}</td>
          </tr>
        </tbody>
      </table>

      <h2 style="font-size: 16px; margin: 24px 0 8px; color: #303030;">Información del proyecto</h2>
      <table style="width: 100%; border-collapse: collapse; font-size: 14px;">
        <tbody>
          <tr>
            <td style="padding: 6px 0; width: 35%; color: #555;"><strong>Tipo de servicio</strong></td>
            <td style="padding: 6px 0; color: #111;">{service_type}</td>
          </tr>
          <tr>
            <td style="padding: 6px 0; color: #555;"><strong>Urgencia / fecha deseada</strong></td>
            <td style="padding: 6px 0; color: #111;">{urgency}</td>
          </tr>
          <tr>
            <td style="padding: 6px 0; vertical-align: top; color: #555;"><strong>Descripción del caso</strong></td>
            <td style="padding: 6px 0; color: #111; white-space: pre-line;">{description}</td>
          </tr>
        </tbody>
      </table>

      <h2 style="font-size: 16px; margin: 24px 0 8px; color: #303030;">Archivos adjuntos</h2>
      <div style="font-size: 14px; color: #111;">{attachments}</div>

      <h2 style="font-size: 16px; margin: 24px 0 8px; color: #303030;">Privacidad</h2>
      <p style="font-size: 13px; color: #555; margin: 0 0 4px;">
        Aceptación de política de privacidad:
        <strong style="color: {privacy_color};">{privacy_value}</strong>
      </p>

      <div style="margin-top: 32px; font-size: 12px; color: #777; border-top: 1px solid #eee; padding-top: 12px;">
        <p style="margin: 0 0 4px;"><strong>{company_name}</strong></p>
        <p style="margin: 0 0 2px;">{company_location}</p>
        <p style="margin: 0 0 2px;">Tel: {company_phone}</p>
        <p style="margin: 0 0 2px;">Email: {company_email}</p>
        <p style="margin: 0;">Web: <a href="{company_website}" target="_blank" style="color: #8c0507; text-decoration: none;">{company_website}</a></p>

        <p style="margin-top: 12px; font-size: 11px; color: #999;">
          Este correo fue generado automáticamente desde el formulario de cotización de NOVAFORTE.
        </p>
      </div>
    </div>
  </div>
</div>"#,
        company_name = COMPANY_NAME,
        company_location = COMPANY_LOCATION,
        company_phone = COMPANY_PHONE,
        company_email = COMPANY_EMAIL,
        company_website = COMPANY_WEBSITE,
        name = escaped_or(&submission.name, "-"),
        email = escaped_or(&submission.email, "-"),
        phone = escaped_or(&submission.phone, "N/A"),
        client_type = escaped_or(&submission.client_type, "N/A"),
        service_type = escaped_or(&submission.service_type, "N/A"),
        urgency = escaped_or(&submission.urgency, "N/A"),
        description = escaped_or(&submission.description, ""),
        attachments = attachments_html(&submission.files),
        privacy_color = privacy_color,
        privacy_value = escaped_or(&submission.privacy_accepted, "-"),
    )
}

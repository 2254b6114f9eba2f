use reignivy_lead::TemplateParams;

#[derive(askama::Template)]
#[template(path = "lead.html")]
pub struct LeadHtmlTemplate<'a> {
    pub params: &'a TemplateParams,
}

#[derive(askama::Template)]
#[template(path = "lead.txt")]
pub struct LeadPlainTemplate<'a> {
    pub params: &'a TemplateParams,
}

/// Renders the html and plain text bodies of a lead email.
pub fn render_lead(params: &TemplateParams) -> anyhow::Result<(String, String)> {
    use askama::Template;

    let html = LeadHtmlTemplate { params }.render()?;
    let plain = LeadPlainTemplate { params }.render()?;

    Ok((html, plain))
}

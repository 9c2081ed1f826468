use crate::links::PARENTS_PARAM;
use crate::markup::Element;
use crate::types::{AffordanceConfig, AffordanceMode};

pub const HEADER_CLASS: &str = "subtickets-header";

/// Builds the "create a child ticket" control and its section heading.
pub struct ChildCreationAffordance;

impl ChildCreationAffordance {
    /// Build the header block for `config.mode`.
    ///
    /// Link mode puts the link inside the heading. Form mode places the form
    /// before the heading.
    pub fn build(config: &AffordanceConfig) -> Element {
        let heading = Element::new("h3").text(config.labels.section_title_text.as_str());
        let header = Element::new("div").class(HEADER_CLASS);

        match config.mode {
            AffordanceMode::Link => header.child(heading.child(Self::link(config))),
            AffordanceMode::Form => header.child(Self::form(config)).child(heading),
        }
    }

    /// Inline link to the new-ticket endpoint carrying only `parents=<id>`.
    pub fn link(config: &AffordanceConfig) -> Element {
        let target = config.new_ticket_endpoint.with_parent(config.parent_id);
        Element::new("span")
            .class("addsubticket")
            .text("(")
            .child(
                Element::new("a")
                    .attr("href", target.href())
                    .text(config.labels.button_or_link_text.as_str()),
            )
            .text(")")
    }

    /// GET form pre-filled with the parent reference and every inherited
    /// field as hidden inputs.
    ///
    /// A GET submit replaces the action's query, so query parameters already
    /// on the endpoint are carried as hidden inputs too. Inherited values win
    /// over endpoint parameters of the same name.
    pub fn form(config: &AffordanceConfig) -> Element {
        let mut submit = Element::new("input")
            .attr("type", "submit")
            .attr("value", config.labels.button_or_link_text.as_str());
        if let Some(title) = &config.labels.button_title {
            submit = submit.attr("title", title.as_str());
        }

        let parents = hidden_input(PARENTS_PARAM, &config.parent_id.to_string());
        let endpoint_params = config
            .new_ticket_endpoint
            .query_pairs()
            .into_iter()
            .filter(|(name, _)| {
                name != PARENTS_PARAM && !config.inherited.contains_key(name)
            })
            .map(|(name, value)| hidden_input(&name, &value));
        let inherited = config
            .inherited
            .iter()
            .filter(|(name, _)| name.as_str() != PARENTS_PARAM)
            .map(|(name, value)| hidden_input(name, value));

        Element::new("form")
            .attr("method", "get")
            .attr("action", config.new_ticket_endpoint.without_query().href())
            .child(
                Element::new("div")
                    .class("inlinebuttons")
                    .child(submit)
                    .child(parents)
                    .children(endpoint_params)
                    .children(inherited),
            )
    }
}

/// Shorthand for [`ChildCreationAffordance::build`].
pub fn build_affordance(config: &AffordanceConfig) -> Element {
    ChildCreationAffordance::build(config)
}

fn hidden_input(name: &str, value: &str) -> Element {
    Element::new("input")
        .attr("type", "hidden")
        .attr("name", name)
        .attr("value", value)
}

/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::priority::{classify, priority_icon, time_since_label};
use crate::suggestions::{Suggestion, SuggestionAction};
use crate::tab_data::{Group, GroupTheme, TabRecord};

/// Inline card style for a group theme
pub fn theme_style(theme: GroupTheme, color: &str) -> String {
    match theme {
        GroupTheme::Gradient => format!(
            "background: linear-gradient(135deg, {c}30 0%, {c}50 100%); border: 2px solid {c}80;",
            c = color
        ),
        GroupTheme::Solid => format!("background: {c}20; border: 2px solid {c};", c = color),
        GroupTheme::Glass => format!(
            "background: {c}15; backdrop-filter: blur(10px); border: 1px solid {c}60;",
            c = color
        ),
    }
}

#[derive(Properties, PartialEq)]
pub struct TabItemProps {
    pub tab: TabRecord,
    pub now: f64,
    pub on_open: Callback<TabRecord>,
}

#[function_component(TabItem)]
pub fn tab_item(props: &TabItemProps) -> Html {
    let tab = &props.tab;
    let priority = classify(tab, props.now);

    let onclick = {
        let tab = tab.clone();
        let on_open = props.on_open.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(tab.clone()))
    };

    let favicon = if tab.favicon.starts_with("http") {
        html! { <img src={tab.favicon.clone()} /> }
    } else {
        html! { <i class={classes!("fas", tab.favicon.clone())}></i> }
    };

    html! {
        <div class="tab-item" {onclick}>
            <div class="tab-favicon">{favicon}</div>
            <div class="tab-info">
                <div class="tab-title">{&tab.title}</div>
                <div class="tab-meta">
                    <span class={classes!("priority-badge", format!("priority-{}", priority.as_str()))}>
                        <i class={classes!("fas", priority_icon(priority))}></i>
                        {format!(" {}", priority.as_str())}
                    </span>
                    <i class="fas fa-eye"></i>
                    {format!(" {} ", tab.visit_count)}
                    <i class="fas fa-clock"></i>
                    {format!(" {}", time_since_label(tab.last_visited, props.now))}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupCardProps {
    pub group: Group,
    pub now: f64,
    pub on_toggle: Callback<String>,
    pub on_delete: Callback<String>,
    pub on_open: Callback<TabRecord>,
}

#[function_component(GroupCard)]
pub fn group_card(props: &GroupCardProps) -> Html {
    let group = &props.group;

    let on_header = {
        let id = group.id.clone();
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()))
    };

    let on_delete = {
        let id = group.id.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_delete.emit(id.clone());
        })
    };

    let chevron = if group.collapsed { "fa-chevron-right" } else { "fa-chevron-down" };

    html! {
        <div
            class={classes!("group-card", group.collapsed.then_some("collapsed"))}
            style={theme_style(group.theme, &group.color)}
        >
            <div class="group-header" onclick={on_header}>
                <div class="group-info">
                    <div class="group-icon"><i class={classes!("fas", group.icon.clone())}></i></div>
                    <div class="group-name">{&group.name}</div>
                    <div class="tab-count">
                        <i class="fas fa-layer-group"></i>
                        {format!(" {}", group.tabs.len())}
                    </div>
                </div>
                <div class="group-actions">
                    <button class="delete-btn" title="Delete group" onclick={on_delete}>
                        <i class="fas fa-trash"></i>
                    </button>
                    <button class="collapse-btn">
                        <i class={classes!("fas", chevron)}></i>
                    </button>
                </div>
            </div>
            if !group.collapsed {
                <div class="tabs-list">
                    {for group.tabs.iter().map(|tab| html! {
                        <TabItem
                            key={tab.id.to_string()}
                            tab={tab.clone()}
                            now={props.now}
                            on_open={props.on_open.clone()}
                        />
                    })}
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SuggestionListProps {
    pub suggestions: Vec<Suggestion>,
    pub on_apply: Callback<SuggestionAction>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(SuggestionList)]
pub fn suggestion_list(props: &SuggestionListProps) -> Html {
    if props.suggestions.is_empty() {
        return html! {
            <div class="suggestion">
                <div class="suggestion-text">
                    <i class="fas fa-check-circle suggestion-icon"></i>
                    {" Everything looks optimized!"}
                </div>
            </div>
        };
    }

    html! {
        <div class="suggestions">
            {for props.suggestions.iter().map(|suggestion| {
                let action = suggestion.action;
                let onclick = {
                    let on_apply = props.on_apply.clone();
                    Callback::from(move |_: MouseEvent| on_apply.emit(action))
                };

                html! {
                    <div class="suggestion" key={action.as_str()}>
                        <div class="suggestion-text">
                            <i class={classes!("fas", suggestion.icon.clone(), "suggestion-icon")}></i>
                            {format!(" {}", suggestion.text)}
                        </div>
                        <Button {onclick} disabled={props.disabled} variant={ButtonVariant::Secondary}>
                            {"Apply"}
                        </Button>
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_styles() {
        assert_eq!(
            theme_style(GroupTheme::Solid, "#8b5a3c"),
            "background: #8b5a3c20; border: 2px solid #8b5a3c;"
        );
        assert!(theme_style(GroupTheme::Gradient, "#6d4226").starts_with("background: linear-gradient(135deg, #6d422630"));
        assert!(theme_style(GroupTheme::Glass, "#6d4226").contains("backdrop-filter: blur(10px)"));
    }
}

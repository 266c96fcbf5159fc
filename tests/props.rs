use rstest::{fixture, rstest};
use toy_dom::{
	props::{is_custom_prop, remove_prop, set_prop, set_props, update_prop, update_props},
	Host, MemoryHost, MemoryNode, Mutation, PropValue, Props,
};

struct Div {
	host: MemoryHost,
	element: MemoryNode,
}

#[fixture]
fn div() -> Div {
	let host = MemoryHost::new();
	let element = host.create_element("div").unwrap();
	host.append_child(&host.body(), &element);
	host.take_mutations();
	Div { host, element }
}

#[rstest]
#[case("a")]
#[case("className")]
#[case("children")]
fn nothing_is_custom(#[case] name: &str) {
	assert!(!is_custom_prop(name));
}

#[rstest]
#[case(PropValue::Bool(true), true)]
#[case(PropValue::Bool(false), false)]
#[case(PropValue::from("x"), true)]
#[case(PropValue::from(""), false)]
#[case(PropValue::Children(vec![]), true)]
fn truthiness(#[case] value: PropValue, #[case] truthy: bool) {
	assert_eq!(value.is_truthy(), truthy);
}

#[rstest]
fn remove_class_name(div: Div) {
	div.host.set_attribute(&div.element, "class", "class list");

	remove_prop(&div.host, &div.element, "className", None);

	assert!(!div.element.has_attribute("class"));
	assert_eq!(div.element.attribute("class"), None);
}

#[rstest]
fn remove_data_prop(div: Div) {
	div.host.set_attribute(&div.element, "data-property", "value");

	remove_prop(&div.host, &div.element, "data-property", Some(&PropValue::from("value")));

	assert!(!div.element.has_attribute("data-property"));
}

#[rstest]
fn remove_boolean_prop(div: Div) {
	div.host.set_attribute(&div.element, "property", "property");
	div.host.set_state(&div.element, "property", true);

	remove_prop(&div.host, &div.element, "property", Some(&PropValue::Bool(false)));

	assert!(!div.element.has_attribute("property"));
	assert!(!div.element.state("property"));
}

#[rstest]
fn set_class_name(div: Div) {
	set_prop(&div.host, &div.element, "className", &"class list".into());

	assert_eq!(div.element.attribute("class").as_deref(), Some("class list"));
	assert!(!div.element.has_attribute("className"));
}

#[rstest]
fn set_data_prop(div: Div) {
	set_prop(&div.host, &div.element, "data-property", &"value".into());

	assert_eq!(div.element.attribute("data-property").as_deref(), Some("value"));
}

#[rstest]
fn set_boolean_prop_round_trip(div: Div) {
	set_prop(&div.host, &div.element, "property", &false.into());
	assert!(!div.element.has_attribute("property"));
	assert!(!div.element.state("property"));

	set_prop(&div.host, &div.element, "property", &true.into());
	assert_eq!(div.element.attribute("property").as_deref(), Some("property"));
	assert!(div.element.state("property"));

	set_prop(&div.host, &div.element, "property", &false.into());
	assert!(!div.element.has_attribute("property"));
	assert!(!div.element.state("property"));
}

#[rstest]
fn children_are_not_attributes(div: Div) {
	set_prop(&div.host, &div.element, "children", &PropValue::Children(vec!["x".into()]));

	assert!(div.element.attributes().is_empty());
	assert!(div.host.mutations().is_empty());
}

#[rstest]
fn set_list_of_props(div: Div) {
	let props = Props::new()
		.with("className", "class list")
		.with("data-property", "value")
		.with("property", true);

	set_props(&div.host, &div.element, &props);

	assert_eq!(div.element.attribute("class").as_deref(), Some("class list"));
	assert_eq!(div.element.attribute("data-property").as_deref(), Some("value"));
	assert_eq!(div.element.attribute("property").as_deref(), Some("property"));
	assert!(div.element.state("property"));
	assert_eq!(div.element.outer_html(), r#"<div class="class list" data-property="value" property="property"></div>"#);
}

#[rstest]
#[case("className", "class")]
#[case("data-property", "data-property")]
fn update_string_prop(div: Div, #[case] name: &str, #[case] attribute: &str) {
	update_prop(&div.host, &div.element, name, Some(&"new".into()), Some(&"old".into()));
	assert_eq!(div.element.attribute(attribute).as_deref(), Some("new"));

	update_prop(&div.host, &div.element, name, None, Some(&"new".into()));
	assert!(!div.element.has_attribute(attribute));
}

#[rstest]
fn update_boolean_prop(div: Div) {
	update_prop(&div.host, &div.element, "property", Some(&true.into()), Some(&false.into()));
	assert!(div.element.has_attribute("property"));
	assert!(div.element.state("property"));

	update_prop(&div.host, &div.element, "property", None, Some(&true.into()));
	assert!(!div.element.has_attribute("property"));
	assert!(!div.element.state("property"));
}

#[rstest]
fn falsy_new_value_removes(div: Div) {
	update_prop(&div.host, &div.element, "title", Some(&"".into()), None);
	assert_eq!(div.host.take_mutations(), vec![Mutation::RemoveAttribute { name: "title".to_owned() }]);
}

#[rstest]
fn equal_values_are_left_alone(div: Div) {
	update_prop(&div.host, &div.element, "className", Some(&"same".into()), Some(&"same".into()));
	update_prop(&div.host, &div.element, "checked", Some(&true.into()), Some(&true.into()));

	assert!(div.host.mutations().is_empty());
}

#[rstest]
fn update_list_of_props(div: Div) {
	let new = Props::new()
		.with("className", "class list")
		.with("data-property", "value")
		.with("property", true);

	update_props(&div.host, &div.element, &new, &Props::new());

	assert_eq!(div.element.attribute("class").as_deref(), Some("class list"));
	assert_eq!(div.element.attribute("data-property").as_deref(), Some("value"));
	assert!(div.element.has_attribute("property"));
	assert!(div.element.state("property"));
}

#[rstest]
fn update_props_touches_only_differences(div: Div) {
	let old = Props::new().with("className", "a").with("href", "/").with("id", "keep");
	set_props(&div.host, &div.element, &old);
	div.host.take_mutations();

	let new = Props::new().with("className", "b").with("id", "keep");
	update_props(&div.host, &div.element, &new, &old);

	let mutations = div.host.take_mutations();
	assert_eq!(mutations.len(), 2);
	assert!(mutations.contains(&Mutation::SetAttribute {
		name: "class".to_owned(),
		value: "b".to_owned(),
	}));
	assert!(mutations.contains(&Mutation::RemoveAttribute { name: "href".to_owned() }));
	assert_eq!(div.element.outer_html(), r#"<div class="b" id="keep"></div>"#);
}

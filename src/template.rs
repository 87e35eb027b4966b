/// A single entry of a scaffold's template table. Both the path and the
/// contents may reference `{name}` and `{class_name}`.
#[derive(Debug, Clone, Copy)]
pub struct Template {
	pub path: &'static str,
	pub contents: &'static str,
}

impl Template {
	pub const fn new(path: &'static str, contents: &'static str) -> Self {
		Template { path, contents }
	}

	pub fn render(&self, placeholders: &Placeholders) -> (String, String) {
		(placeholders.render(self.path), placeholders.render(self.contents))
	}
}

/// Upper-cases the first character of `name` and leaves the rest untouched.
pub fn class_name(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Values substituted for the two recognised placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
	pub name: String,
	pub class_name: String,
}

impl Placeholders {
	pub fn new(name: &str) -> Self {
		Placeholders {
			name: name.to_string(),
			class_name: class_name(name),
		}
	}

	/// Replaces `{name}` and `{class_name}` in a single pass. Any other brace
	/// sequence is copied through, and substituted text is never re-scanned.
	pub fn render(&self, template: &str) -> String {
		let mut out = String::with_capacity(template.len());
		let mut rest = template;

		while let Some(start) = rest.find('{') {
			out.push_str(&rest[..start]);
			let tail = &rest[start..];

			if let Some(after) = tail.strip_prefix("{name}") {
				out.push_str(&self.name);
				rest = after;
			} else if let Some(after) = tail.strip_prefix("{class_name}") {
				out.push_str(&self.class_name);
				rest = after;
			} else {
				out.push('{');
				rest = &tail[1..];
			}
		}
		out.push_str(rest);

		out
	}
}

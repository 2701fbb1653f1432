use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{
  class::ClassDecl,
  members::{Annotation, FieldDecl, Javadoc, Member, MethodDecl, Parameter},
  modifiers::Modifier,
  statements::{Expr, Statement},
  types::{JavaType, simple_name},
};

const INDENT: &str = "    ";

/// Renders classes as Java source text in a fixed layout.
///
/// Class references are printed by simple name and collected into import declarations.
/// The output is meant for previewing generated members, not as a formatter.
#[derive(Debug, Default)]
pub struct JavaRenderer {
  out: String,
  depth: usize,
}

impl JavaRenderer {
  /// Renders a top-level class as a complete compilation unit.
  #[must_use]
  pub fn render_unit(class: &ClassDecl) -> String {
    let mut renderer = Self::default();
    if !class.package.is_empty() {
      renderer.line(&format!("package {};", class.package));
      renderer.blank();
    }

    let imports = collect_imports(class);
    if !imports.is_empty() {
      for import in &imports {
        renderer.line(&format!("import {import};"));
      }
      renderer.blank();
    }

    renderer.class(class);
    renderer.out
  }

  /// Renders a class declaration without package or imports.
  #[must_use]
  pub fn render_class(class: &ClassDecl) -> String {
    let mut renderer = Self::default();
    renderer.class(class);
    renderer.out
  }

  fn line(&mut self, text: &str) {
    for _ in 0..self.depth {
      self.out.push_str(INDENT);
    }
    self.out.push_str(text);
    self.out.push('\n');
  }

  fn blank(&mut self) {
    self.out.push('\n');
  }

  fn javadoc(&mut self, doc: Option<&Javadoc>) {
    let Some(doc) = doc.filter(|doc| !doc.is_empty()) else {
      return;
    };
    self.line("/**");
    for text in doc.lines() {
      if text.is_empty() {
        self.line(" *");
      } else {
        self.line(&format!(" * {text}"));
      }
    }
    self.line(" */");
  }

  fn annotations(&mut self, annotations: &[Annotation]) {
    for annotation in annotations {
      self.line(&annotation_text(annotation));
    }
  }

  fn class(&mut self, class: &ClassDecl) {
    self.javadoc(class.doc.as_ref());
    self.annotations(&class.annotations);

    let mut header = prefixed(&class.modifiers.keywords());
    header.push_str(&format!("{} {}", class.kind, class.name));
    if let Some(superclass) = &class.superclass {
      header.push_str(&format!(" extends {}", simple_name(superclass)));
    }
    header.push_str(" {");
    self.line(&header);

    self.depth += 1;
    let mut previous: Option<&Member> = None;
    for member in &class.members {
      let both_fields = matches!((previous, member), (Some(Member::Field(_)), Member::Field(_)));
      if previous.is_some() && !both_fields {
        self.blank();
      }
      match member {
        Member::Field(field) => self.field(field),
        Member::Method(method) => self.method(method, class),
        Member::Class(nested) => self.class(nested),
      }
      previous = Some(member);
    }
    self.depth -= 1;

    self.line("}");
  }

  fn field(&mut self, field: &FieldDecl) {
    self.javadoc(field.doc.as_ref());
    self.annotations(&field.annotations);
    let mut text = prefixed(&field.modifiers.keywords());
    text.push_str(&format!("{} {}", field.ty.presentable_text(), field.name));
    if let Some(initializer) = &field.initializer {
      text.push_str(&format!(" = {initializer}"));
    }
    text.push(';');
    self.line(&text);
  }

  fn method(&mut self, method: &MethodDecl, owner: &ClassDecl) {
    self.javadoc(method.doc.as_ref());
    self.annotations(&method.annotations);

    let mut signature = prefixed(&method.modifiers.keywords());
    if let Some(returns) = &method.returns {
      signature.push_str(&returns.presentable_text());
      signature.push(' ');
    }
    signature.push_str(&format!(
      "{}({})",
      method.name,
      method.params.iter().map(parameter_text).join(", ")
    ));

    let bodiless = method.modifiers.contains(Modifier::Abstract) || (owner.is_interface() && method.body.is_empty());
    if bodiless {
      signature.push(';');
      self.line(&signature);
      return;
    }

    signature.push_str(" {");
    self.line(&signature);
    self.depth += 1;
    for statement in &method.body {
      self.line(&statement_text(statement));
    }
    self.depth -= 1;
    self.line("}");
  }
}

fn prefixed(keywords: &str) -> String {
  if keywords.is_empty() {
    String::new()
  } else {
    format!("{keywords} ")
  }
}

fn annotation_text(annotation: &Annotation) -> String {
  match &annotation.arguments {
    Some(arguments) => format!("@{}({arguments})", annotation.simple_name()),
    None => format!("@{}", annotation.simple_name()),
  }
}

fn parameter_text(param: &Parameter) -> String {
  let mut text = String::new();
  for annotation in &param.annotations {
    text.push_str(&annotation_text(annotation));
    text.push(' ');
  }
  if param.is_final {
    text.push_str("final ");
  }
  text.push_str(&format!("{} {}", param.ty.presentable_text(), param.name));
  text
}

fn statement_text(statement: &Statement) -> String {
  match statement {
    Statement::Expr(expr) => format!("{};", expr_text(expr)),
    Statement::Assign { target, value } => format!("{} = {};", expr_text(target), expr_text(value)),
    Statement::Local { ty, name, init } => format!("{} {name} = {};", ty.presentable_text(), expr_text(init)),
    Statement::Return(expr) => format!("return {};", expr_text(expr)),
    Statement::Raw(text) => text.clone(),
  }
}

fn expr_text(expr: &Expr) -> String {
  match expr {
    Expr::This => "this".to_string(),
    Expr::Name(name) | Expr::Raw(name) => name.clone(),
    Expr::Type(ty) => ty.presentable_text(),
    Expr::Field { receiver, name } => format!("{}.{name}", expr_text(receiver)),
    Expr::Call { receiver, method, args } => {
      let args = args.iter().map(expr_text).join(", ");
      match receiver {
        Some(receiver) => format!("{}.{method}({args})", expr_text(receiver)),
        None => format!("{method}({args})"),
      }
    }
    Expr::New { ty, args } => format!("new {}({})", ty.presentable_text(), args.iter().map(expr_text).join(", ")),
    Expr::Str(value) => format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")),
  }
}

/// Qualified names that need an import in the unit rooted at `class`.
fn collect_imports(class: &ClassDecl) -> BTreeSet<String> {
  let mut referenced = BTreeSet::new();
  collect_class_references(class, &mut referenced);

  let own_prefix = format!("{}.", crate::repository::qualify(&class.package, &class.name));
  referenced
    .into_iter()
    .filter(|name| {
      let Some((parent, _)) = name.rsplit_once('.') else {
        return false;
      };
      parent != "java.lang" && parent != class.package && !name.starts_with(&own_prefix)
    })
    .collect()
}

fn add_type(ty: &JavaType, referenced: &mut BTreeSet<String>) {
  referenced.extend(ty.referenced_classes().into_iter().map(str::to_string));
}

fn collect_class_references(class: &ClassDecl, referenced: &mut BTreeSet<String>) {
  for annotation in &class.annotations {
    referenced.insert(annotation.name.clone());
  }
  if let Some(superclass) = &class.superclass {
    referenced.insert(superclass.clone());
  }

  for member in &class.members {
    match member {
      Member::Field(field) => {
        add_type(&field.ty, referenced);
        referenced.extend(field.annotations.iter().map(|annotation| annotation.name.clone()));
      }
      Member::Method(method) => {
        if let Some(returns) = &method.returns {
          add_type(returns, referenced);
        }
        referenced.extend(method.annotations.iter().map(|annotation| annotation.name.clone()));
        for param in &method.params {
          add_type(&param.ty, referenced);
          referenced.extend(param.annotations.iter().map(|annotation| annotation.name.clone()));
        }
        for statement in &method.body {
          collect_statement_references(statement, referenced);
        }
      }
      Member::Class(nested) => collect_class_references(nested, referenced),
    }
  }
}

fn collect_statement_references(statement: &Statement, referenced: &mut BTreeSet<String>) {
  match statement {
    Statement::Expr(expr) | Statement::Return(expr) => collect_expr_references(expr, referenced),
    Statement::Assign { target, value } => {
      collect_expr_references(target, referenced);
      collect_expr_references(value, referenced);
    }
    Statement::Local { ty, init, .. } => {
      add_type(ty, referenced);
      collect_expr_references(init, referenced);
    }
    Statement::Raw(_) => {}
  }
}

fn collect_expr_references(expr: &Expr, referenced: &mut BTreeSet<String>) {
  match expr {
    Expr::Type(ty) => add_type(ty, referenced),
    Expr::New { ty, args } => {
      add_type(ty, referenced);
      for arg in args {
        collect_expr_references(arg, referenced);
      }
    }
    Expr::Field { receiver, .. } => collect_expr_references(receiver, referenced),
    Expr::Call { receiver, args, .. } => {
      if let Some(receiver) = receiver {
        collect_expr_references(receiver, referenced);
      }
      for arg in args {
        collect_expr_references(arg, referenced);
      }
    }
    Expr::This | Expr::Name(_) | Expr::Str(_) | Expr::Raw(_) => {}
  }
}

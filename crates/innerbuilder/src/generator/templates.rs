//! Member templates for the builder and the class it builds.
//!
//! Every function here is pure: it turns planned fields and options into model members and
//! leaves placement to the merger.

use innerbuilder_model::{
  Annotation, ClassDecl, Expr, FieldDecl, JavaType, Javadoc, MethodDecl, Modifier, Modifiers, Parameter, Statement,
  Visibility,
};

use crate::generator::{
  constants::{
    BUILD_METHOD_NAME, BUILDER_CLASS_NAME, BUILDER_PARAMETER_NAME, COPY_PARAMETER_NAME, FINDBUGS_NONNULL,
    JSR305_NONNULL, OBJECTS_CLASS, PMD_AVOID_FIELD_NAME_MATCHING_METHOD_NAME, REQUIRE_NON_NULL, SUPPRESS_WARNINGS,
  },
  naming::{setter_method_name, setter_parameter_name},
  options::{OptionSet, ToggleOption},
  plan::{CopyRead, FieldRole, PlannedField, TargetAssignment},
};

pub(crate) struct MemberTemplates<'a> {
  options: &'a OptionSet,
  target_name: &'a str,
  target_type: JavaType,
  builder_type: JavaType,
}

impl<'a> MemberTemplates<'a> {
  pub(crate) fn new(options: &'a OptionSet, target: &str, target_name: &'a str) -> Self {
    Self {
      options,
      target_name,
      target_type: JavaType::class(target),
      builder_type: JavaType::class(format!("{target}.{BUILDER_CLASS_NAME}")),
    }
  }

  pub(crate) const fn target_name(&self) -> &'a str {
    self.target_name
  }

  pub(crate) const fn target_type(&self) -> &JavaType {
    &self.target_type
  }

  pub(crate) const fn builder_type(&self) -> &JavaType {
    &self.builder_type
  }

  fn enabled(&self, option: ToggleOption) -> bool {
    self.options.contains(option)
  }

  /// Nullability annotations for a value of `ty`; primitives never get any.
  fn nullability(&self, ty: &JavaType) -> Vec<Annotation> {
    if ty.is_primitive() {
      return vec![];
    }
    let mut annotations = vec![];
    if self.enabled(ToggleOption::Jsr305Annotations) {
      annotations.push(Annotation::marker(JSR305_NONNULL));
    }
    if self.enabled(ToggleOption::FindbugsAnnotations) {
      annotations.push(Annotation::marker(FINDBUGS_NONNULL));
    }
    annotations
  }

  fn parameter(&self, name: &str, ty: &JavaType) -> Parameter {
    Parameter::builder()
      .name(name)
      .ty(ty.clone())
      .is_final(self.enabled(ToggleOption::FinalParameters))
      .annotations(self.nullability(ty))
      .build()
  }

  fn javadoc(&self, lines: impl IntoIterator<Item = String>) -> Option<Javadoc> {
    self
      .enabled(ToggleOption::Javadoc)
      .then(|| Javadoc::from_lines(lines))
  }

  /// `param`, wrapped in `Objects.requireNonNull` when null checks apply to `ty`.
  fn checked(&self, param: &str, field: &str, ty: &JavaType) -> Expr {
    if self.enabled(ToggleOption::NullChecks) && !ty.is_primitive() {
      Expr::static_call(
        JavaType::class(OBJECTS_CLASS),
        REQUIRE_NON_NULL,
        [Expr::name(param), Expr::Str(format!("{field} must not be null"))],
      )
    } else {
      Expr::name(param)
    }
  }

  /// `copy.field` or `copy.getField()`; `None` for a field the builder cannot read.
  fn copied(planned: &PlannedField) -> Option<Expr> {
    let copy = Expr::name(COPY_PARAMETER_NAME);
    match planned.copy_read.as_ref()? {
      CopyRead::Field => Some(Expr::field(copy, planned.name())),
      CopyRead::Getter(getter) => Some(Expr::Call {
        receiver: Some(Box::new(copy)),
        method: getter.clone(),
        args: vec![],
      }),
    }
  }

  pub(crate) fn builder_class(&self) -> ClassDecl {
    let mut builder = ClassDecl::builder()
      .name(BUILDER_CLASS_NAME)
      .modifiers(
        Modifiers::new()
          .with(Modifier::Public)
          .with(Modifier::Static)
          .with(Modifier::Final),
      )
      .build();
    self.decorate_builder_class(&mut builder);
    builder
  }

  /// Adds the class-level Javadoc and PMD suppression the options ask for, once.
  pub(crate) fn decorate_builder_class(&self, builder: &mut ClassDecl) {
    if builder.doc.is_none() {
      builder.doc = self.javadoc([format!("{{@code {}}} builder static inner class.", self.target_name)]);
    }
    if self.enabled(ToggleOption::PmdSuppression) && !builder.has_annotation(SUPPRESS_WARNINGS) {
      builder.annotations.push(Annotation::with_arguments(
        SUPPRESS_WARNINGS,
        PMD_AVOID_FIELD_NAME_MATCHING_METHOD_NAME,
      ));
    }
  }

  pub(crate) fn builder_field(&self, planned: &PlannedField) -> FieldDecl {
    let mut field = FieldDecl::builder()
      .name(planned.name())
      .ty(planned.ty().clone())
      .modifiers(Modifiers::new().with(Modifier::Private))
      .build();
    field.modifiers.set(Modifier::Final, planned.role == FieldRole::Structural);
    field
  }

  pub(crate) fn builder_constructor(&self, structural: &[&PlannedField], private: bool) -> MethodDecl {
    let visibility = if private { Visibility::Private } else { Visibility::Public };

    let preconditions = structural
      .iter()
      .filter(|planned| self.enabled(ToggleOption::NullChecks) && !planned.ty().is_primitive())
      .map(|planned| Statement::Expr(self.checked(planned.name(), planned.name(), planned.ty())));
    let assignments = structural
      .iter()
      .map(|planned| Statement::assign(Expr::this_field(planned.name()), Expr::name(planned.name())));

    MethodDecl::builder()
      .name(BUILDER_CLASS_NAME)
      .modifiers(Modifiers::new().with_visibility(visibility))
      .params(
        structural
          .iter()
          .map(|planned| self.parameter(planned.name(), planned.ty()))
          .collect(),
      )
      .body(preconditions.chain(assignments).collect())
      .build()
  }

  pub(crate) fn static_factory(&self, structural: &[&PlannedField]) -> MethodDecl {
    let args = structural.iter().map(|planned| Expr::name(planned.name()));

    MethodDecl::builder()
      .name(self.options.static_factory_name.method_name(self.target_name))
      .returns(self.builder_type.clone())
      .modifiers(Modifiers::new().with(Modifier::Public).with(Modifier::Static))
      .annotations(self.nullability(&self.builder_type))
      .params(
        structural
          .iter()
          .map(|planned| self.parameter(planned.name(), planned.ty()))
          .collect(),
      )
      .body(vec![Statement::Return(Expr::new_instance(self.builder_type.clone(), args))])
      .build()
  }

  /// Builder constructor that copies every readable selected field from an existing instance.
  pub(crate) fn copy_constructor(&self, fields: &[PlannedField]) -> MethodDecl {
    MethodDecl::builder()
      .name(BUILDER_CLASS_NAME)
      .modifiers(Modifiers::new().with(Modifier::Public))
      .params(vec![self.parameter(COPY_PARAMETER_NAME, &self.target_type)])
      .body(
        fields
          .iter()
          .filter_map(|planned| {
            Self::copied(planned).map(|value| Statement::assign(Expr::this_field(planned.name()), value))
          })
          .collect(),
      )
      .build()
  }

  /// Static counterpart of [`Self::copy_constructor`] used alongside the static factory.
  pub(crate) fn copy_factory(&self, fields: &[PlannedField]) -> MethodDecl {
    let builder = Expr::name(BUILDER_PARAMETER_NAME);

    let constructor_args = fields
      .iter()
      .filter(|planned| planned.role == FieldRole::Structural)
      .map(|planned| {
        Self::copied(planned).unwrap_or_else(|| Expr::field(Expr::name(COPY_PARAMETER_NAME), planned.name()))
      });

    let mut body = vec![Statement::local(
      self.builder_type.clone(),
      BUILDER_PARAMETER_NAME,
      Expr::new_instance(self.builder_type.clone(), constructor_args),
    )];
    body.extend(
      fields
        .iter()
        .filter(|planned| planned.role == FieldRole::Mutable)
        .filter_map(|planned| {
          Self::copied(planned).map(|value| Statement::assign(Expr::field(builder.clone(), planned.name()), value))
        }),
    );
    body.push(Statement::Return(builder));

    MethodDecl::builder()
      .name(self.options.static_factory_name.method_name(self.target_name))
      .returns(self.builder_type.clone())
      .modifiers(Modifiers::new().with(Modifier::Public).with(Modifier::Static))
      .annotations(self.nullability(&self.builder_type))
      .params(vec![self.parameter(COPY_PARAMETER_NAME, &self.target_type)])
      .body(body)
      .build()
  }

  pub(crate) fn setter(&self, planned: &PlannedField) -> MethodDecl {
    let field = planned.name();
    let param = setter_parameter_name(field, self.enabled(ToggleOption::FieldNameParameters));
    let target = if param == field {
      Expr::this_field(field)
    } else {
      Expr::name(field)
    };

    MethodDecl::builder()
      .name(setter_method_name(field, self.options.setter_notation()))
      .returns(self.builder_type.clone())
      .modifiers(Modifiers::new().with(Modifier::Public))
      .annotations(self.nullability(&self.builder_type))
      .params(vec![self.parameter(&param, planned.ty())])
      .body(vec![
        Statement::assign(target, self.checked(&param, field, planned.ty())),
        Statement::Return(Expr::This),
      ])
      .maybe_doc(self.javadoc([
        format!(
          "Sets the {{@code {field}}} and returns a reference to this Builder so that the methods can be chained together."
        ),
        format!("@param {param} the {{@code {field}}} to set"),
        "@return a reference to this Builder".to_string(),
      ]))
      .build()
  }

  pub(crate) fn build_method(&self) -> MethodDecl {
    let target = self.target_name;

    MethodDecl::builder()
      .name(BUILD_METHOD_NAME)
      .returns(self.target_type.clone())
      .modifiers(Modifiers::new().with(Modifier::Public))
      .annotations(self.nullability(&self.target_type))
      .body(vec![Statement::Return(Expr::new_instance(
        self.target_type.clone(),
        [Expr::This],
      ))])
      .maybe_doc(self.javadoc([
        format!("Returns a {{@code {target}}} built from the parameters previously set."),
        String::new(),
        format!("@return a {{@code {target}}} built with parameters of this {{@code {target}.Builder}}"),
      ]))
      .build()
  }

  /// `private Target(Builder builder)`, copying every selected field out of the builder.
  pub(crate) fn target_constructor(&self, fields: &[PlannedField]) -> MethodDecl {
    let builder = Expr::name(BUILDER_PARAMETER_NAME);

    let body = fields
      .iter()
      .map(|planned| {
        let value = Expr::field(builder.clone(), planned.name());
        match &planned.assignment {
          TargetAssignment::Direct => Statement::assign(Expr::name(planned.name()), value),
          TargetAssignment::Setter(setter) => Statement::Expr(Expr::call(setter.as_str(), [value])),
        }
      })
      .collect();

    MethodDecl::builder()
      .name(self.target_name)
      .modifiers(Modifiers::new().with(Modifier::Private))
      .params(vec![
        Parameter::builder()
          .name(BUILDER_PARAMETER_NAME)
          .ty(self.builder_type.clone())
          .is_final(self.enabled(ToggleOption::FinalParameters))
          .build(),
      ])
      .body(body)
      .build()
  }
}

//! Intrinsic table builder.
//!
//! Rows are collected with [`LutKey`]s pointing into deduplicating tables.
//! Once every intrinsic has been visited, the tables are compacted leaves
//! first (matcher indices, template rows, parameters, overloads) and each
//! key is replaced by its final offset.

use indexmap::IndexSet;
use intrindef_table::{
    IntrinsicRow, IntrinsicTable, Lut, LutKey, MatcherIndex, OverloadRow, ParameterRow,
    StageUses, TemplateNumberRow, TemplateTypeRow,
};

use super::matchers::Matchers;
use crate::diagnostics::GenerationError;
use crate::sem::{
    FullyQualifiedName, IntrinsicId, Named, Overload, OverloadId, Sem, TemplateArg,
    TemplateParamId, TemplateParamKind,
};

type Result<T> = std::result::Result<T, GenerationError>;

/// Build the intrinsic table for a resolved declaration file.
pub fn build_intrinsic_table(sem: &Sem) -> Result<IntrinsicTable> {
    let table = TableBuilder::new(sem).build()?;
    tracing::debug!(
        type_matchers = table.type_matchers.len(),
        number_matchers = table.number_matchers.len(),
        matcher_indices = table.matcher_indices.len(),
        parameters = table.parameters.len(),
        overloads = table.overloads.len(),
        const_eval_functions = table.const_eval_functions.len(),
        "built intrinsic table"
    );
    Ok(table)
}

pub struct TableBuilder<'a> {
    sem: &'a Sem,
    matchers: Matchers,
    matcher_indices: Lut<MatcherIndex>,
    template_types: Lut<TemplateTypeRow>,
    template_numbers: Lut<TemplateNumberRow>,
    parameters: Lut<ParameterRow<LutKey>>,
    overloads: Lut<OverloadRow<LutKey>>,
    const_eval_indices: Lut<u32>,
    const_eval_functions: IndexSet<String>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(sem: &'a Sem) -> Self {
        Self {
            sem,
            matchers: Matchers::new(sem),
            matcher_indices: Lut::new(),
            template_types: Lut::new(),
            template_numbers: Lut::new(),
            parameters: Lut::new(),
            overloads: Lut::new(),
            const_eval_indices: Lut::new(),
            const_eval_functions: IndexSet::new(),
        }
    }

    pub fn build(mut self) -> Result<IntrinsicTable> {
        let sem = self.sem;
        let mut families: [Vec<IntrinsicRow<LutKey>>; 4] = Default::default();
        for (rows, (_, ids)) in families.iter_mut().zip(sem.families()) {
            for &id in ids {
                rows.push(self.intrinsic(id)?);
            }
        }

        let matcher_indices = self.matcher_indices.compact();
        let template_types = self.template_types.compact();
        let template_numbers = self.template_numbers.compact();
        let const_eval = self.const_eval_indices.compact();
        let parameters = self.parameters.compact().map_items(|row| ParameterRow {
            usage: row.usage,
            matcher_indices_offset: matcher_indices.resolve(row.matcher_indices_offset),
        });
        let overloads = self.overloads.compact().map_items(|row| OverloadRow {
            num_parameters: row.num_parameters,
            num_template_types: row.num_template_types,
            num_template_numbers: row.num_template_numbers,
            template_types_offset: template_types.resolve(row.template_types_offset),
            template_numbers_offset: template_numbers.resolve(row.template_numbers_offset),
            parameters_offset: parameters.resolve(row.parameters_offset),
            return_matcher_indices_offset: matcher_indices
                .resolve(row.return_matcher_indices_offset),
            const_eval_function_offset: const_eval.resolve(row.const_eval_function_offset),
            stages: row.stages,
            must_use: row.must_use,
            is_deprecated: row.is_deprecated,
            kind: row.kind,
        });

        let [builtins, unary_operators, binary_operators, constructors_and_converters] =
            families.map(|rows| {
                rows.into_iter()
                    .map(|row| IntrinsicRow {
                        name: row.name,
                        overload_descriptions: row.overload_descriptions,
                        num_overloads: row.num_overloads,
                        overloads_offset: overloads.resolve(row.overloads_offset),
                    })
                    .collect::<Vec<IntrinsicRow>>()
            });

        let (type_matchers, number_matchers) = self.matchers.into_slots();
        Ok(IntrinsicTable {
            type_matchers,
            number_matchers,
            matcher_indices: matcher_indices.into_items(),
            template_types: template_types.into_items(),
            template_numbers: template_numbers.into_items(),
            parameters: parameters.into_items(),
            overloads: overloads.into_items(),
            const_eval_function_indices: const_eval.into_items(),
            const_eval_functions: self.const_eval_functions.into_iter().collect(),
            builtins,
            unary_operators,
            binary_operators,
            constructors_and_converters,
        })
    }

    fn intrinsic(&mut self, id: IntrinsicId) -> Result<IntrinsicRow<LutKey>> {
        let sem = self.sem;
        let intrinsic = &sem[id];
        let mut rows = Vec::with_capacity(intrinsic.overloads.len());
        let mut descriptions = Vec::with_capacity(intrinsic.overloads.len());
        for &overload in &intrinsic.overloads {
            rows.push(self.overload(overload)?);
            descriptions.push(sem[overload].description.clone());
        }

        Ok(IntrinsicRow {
            name: intrinsic.name.clone(),
            overload_descriptions: descriptions,
            num_overloads: rows.len() as u32,
            overloads_offset: self.overloads.add(&rows),
        })
    }

    fn overload(&mut self, id: OverloadId) -> Result<OverloadRow<LutKey>> {
        let sem = self.sem;
        let overload = &sem[id];
        tracing::trace!(
            intrinsic = %sem[overload.intrinsic].name,
            overload = id.as_u32(),
            "building overload row"
        );

        let template_types = overload
            .template_types
            .iter()
            .map(|&p| self.template_type_row(overload, p))
            .collect::<Result<Vec<_>>>()?;
        let template_numbers = overload
            .template_numbers
            .iter()
            .map(|&p| self.template_number_row(overload, p))
            .collect::<Result<Vec<_>>>()?;

        let mut parameters = Vec::with_capacity(overload.parameters.len());
        for param in &overload.parameters {
            let indices = self.lower(overload, &param.ty)?;
            parameters.push(ParameterRow {
                usage: param.name.clone(),
                matcher_indices_offset: self.matcher_indices.add(&indices),
            });
        }

        let return_matcher_indices_offset = match &overload.return_type {
            Some(ret) => {
                let indices = self.lower(overload, ret)?;
                self.matcher_indices.add(&indices)
            }
            None => None,
        };

        let const_eval_function_offset = match &overload.const_eval_fn {
            Some(name) => {
                let (index, _) = self.const_eval_functions.insert_full(name.clone());
                self.const_eval_indices.add(&[index as u32])
            }
            None => None,
        };

        Ok(OverloadRow {
            num_parameters: parameters.len() as u32,
            num_template_types: template_types.len() as u32,
            num_template_numbers: template_numbers.len() as u32,
            template_types_offset: self.template_types.add(&template_types),
            template_numbers_offset: self.template_numbers.add(&template_numbers),
            parameters_offset: self.parameters.add(&parameters),
            return_matcher_indices_offset,
            const_eval_function_offset,
            stages: self.stages(overload),
            must_use: overload.must_use,
            is_deprecated: overload.is_deprecated,
            kind: overload.kind,
        })
    }

    fn template_type_row(
        &self,
        overload: &Overload,
        param: TemplateParamId,
    ) -> Result<TemplateTypeRow> {
        let template = &self.sem[param];
        let matcher_index = match &template.kind {
            TemplateParamKind::Type {
                constraint: Some(fqn),
            } => Some(self.matcher_index(overload, fqn.target)?),
            _ => None,
        };
        Ok(TemplateTypeRow {
            name: template.name.clone(),
            matcher_index,
        })
    }

    fn template_number_row(
        &self,
        overload: &Overload,
        param: TemplateParamId,
    ) -> Result<TemplateNumberRow> {
        let template = &self.sem[param];
        let matcher_index = match &template.kind {
            TemplateParamKind::Enum { matcher, .. } => {
                Some(self.matcher_index(overload, Named::EnumMatcher(*matcher))?)
            }
            _ => None,
        };
        Ok(TemplateNumberRow {
            name: template.name.clone(),
            matcher_index,
        })
    }

    /// Matcher indices of a type, target first, then each argument depth-first.
    fn lower(&self, overload: &Overload, fqn: &FullyQualifiedName) -> Result<Vec<MatcherIndex>> {
        let mut out = Vec::new();
        self.lower_into(overload, fqn, &mut out)?;
        Ok(out)
    }

    fn lower_into(
        &self,
        overload: &Overload,
        fqn: &FullyQualifiedName,
        out: &mut Vec<MatcherIndex>,
    ) -> Result<()> {
        out.push(self.matcher_index(overload, fqn.target)?);
        for arg in &fqn.args {
            match arg {
                TemplateArg::Name(inner) => self.lower_into(overload, inner, out)?,
                TemplateArg::Number(n) => {
                    return Err(GenerationError::at(
                        overload.location.clone(),
                        format!("unexpected number {n} in a declared signature"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Template parameters map to their position within the overload's own
    /// template types or numbers, which index the reserved slots.
    fn matcher_index(&self, overload: &Overload, named: Named) -> Result<MatcherIndex> {
        let index = match named {
            Named::TemplateParam(param) => overload
                .template_types
                .iter()
                .position(|&p| p == param)
                .or_else(|| overload.template_numbers.iter().position(|&p| p == param))
                .map(|i| i as MatcherIndex),
            _ => self.matchers.index_of(named),
        };
        index.ok_or_else(|| {
            GenerationError::at(
                overload.location.clone(),
                format!("{} has no matcher index", self.sem.describe(named)),
            )
        })
    }

    /// The declared stages, minus vertex and fragment when a parameter is a
    /// pointer that can only be in the `workgroup` address space.
    fn stages(&self, overload: &Overload) -> StageUses {
        let mut stages = overload.stages;
        if overload
            .parameters
            .iter()
            .any(|p| self.is_workgroup_pointer(&p.ty))
        {
            stages.vertex = false;
            stages.fragment = false;
        }
        stages
    }

    fn is_workgroup_pointer(&self, fqn: &FullyQualifiedName) -> bool {
        let sem = self.sem;
        if !matches!(fqn.target, Named::Type(_)) || sem.name_of(fqn.target) != "ptr" {
            return false;
        }
        let Some(space) = fqn.name_args().next() else {
            return false;
        };
        let matcher = match space.target {
            Named::EnumMatcher(m) => m,
            Named::TemplateParam(p) => match sem[p].kind {
                TemplateParamKind::Enum { matcher, .. } => matcher,
                _ => return false,
            },
            _ => return false,
        };
        let mut options = sem[matcher]
            .options
            .iter()
            .filter(|&&e| !sem[e].is_internal)
            .peekable();
        options.peek().is_some() && options.all(|&e| sem[e].name == "workgroup")
    }
}

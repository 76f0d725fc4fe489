//! Entity writer for STEP `DATA` sections.
//!
//! Writes the product structure around the B-reps: contexts and units,
//! one product per part, the assembly links and the colour styles. The
//! B-reps themselves come from [`super::brep`].

use std::fmt::{self, Write};

use super::brep::import_body;
use super::error::StepResult;
use super::{StepHeader, SCHEMA};
use crate::model::{Assembly, Color};

/// Reference to a written entity (`#n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Ref(pub(super) usize);

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Appends numbered entity instances.
pub(super) struct EntityWriter {
    data: String,
    next_id: usize,
}

impl EntityWriter {
    pub(super) const fn new() -> Self {
        Self {
            data: String::new(),
            next_id: 1,
        }
    }

    pub(super) fn add(&mut self, entity: impl fmt::Display) -> Ref {
        let id = Ref(self.next_id);
        self.next_id += 1;
        let _ = writeln!(self.data, "{id} = {entity};");
        id
    }

    /// The reference the next [`EntityWriter::add`] will return.
    pub(super) const fn next_ref(&self) -> Ref {
        Ref(self.next_id)
    }

    /// Instances written so far, one per line.
    pub(super) fn data(&self) -> &str {
        &self.data
    }

    /// World-aligned placement at the origin.
    fn identity_placement(&mut self) -> Ref {
        let origin = self.add("CARTESIAN_POINT('',(0.,0.,0.))");
        let axis = self.add("DIRECTION('',(0.,0.,1.))");
        let reference = self.add("DIRECTION('',(1.,0.,0.))");
        self.add(format_args!(
            "AXIS2_PLACEMENT_3D('',{origin},{axis},{reference})"
        ))
    }
}

/// Formats a REAL: always with a decimal point, noise below 1e-10 removed.
fn real(value: f64) -> String {
    let rounded = (value * 1e10).round() / 1e10;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = rounded.to_string();
    if !text.contains('.') {
        text.push('.');
    }
    text
}

/// Formats a STRING literal, doubling embedded apostrophes.
pub(super) fn string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Formats an aggregate of references.
fn list(refs: &[Ref]) -> String {
    let items: Vec<String> = refs.iter().map(ToString::to_string).collect();
    format!("({})", items.join(","))
}

/// Shared context entities.
struct Contexts {
    product: Ref,
    definition: Ref,
    geometry: Ref,
}

fn write_contexts(w: &mut EntityWriter) -> Contexts {
    let application =
        w.add("APPLICATION_CONTEXT('core data for automotive mechanical design processes')");
    w.add(format_args!(
        "APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,{application})"
    ));
    let product = w.add(format_args!("PRODUCT_CONTEXT('',{application},'mechanical')"));
    let definition = w.add(format_args!(
        "PRODUCT_DEFINITION_CONTEXT('part definition',{application},'design')"
    ));

    let length = w.add("( LENGTH_UNIT() NAMED_UNIT(*) SI_UNIT(.MILLI.,.METRE.) )");
    let angle = w.add("( NAMED_UNIT(*) PLANE_ANGLE_UNIT() SI_UNIT($,.RADIAN.) )");
    let solid_angle = w.add("( NAMED_UNIT(*) SI_UNIT($,.STERADIAN.) SOLID_ANGLE_UNIT() )");
    let uncertainty = w.add(format_args!(
        "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-07),{length},'distance_accuracy_value','confusion accuracy')"
    ));
    let geometry = w.add(format_args!(
        "( GEOMETRIC_REPRESENTATION_CONTEXT(3) GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT(({uncertainty})) \
         GLOBAL_UNIT_ASSIGNED_CONTEXT(({length},{angle},{solid_angle})) \
         REPRESENTATION_CONTEXT('Context #1','3D Context with UNIT and UNCERTAINTY') )"
    ));

    Contexts {
        product,
        definition,
        geometry,
    }
}

/// Entities describing one product.
struct ProductRefs {
    product: Ref,
    definition: Ref,
    shape: Ref,
}

fn write_product(w: &mut EntityWriter, contexts: &Contexts, name: &str) -> ProductRefs {
    let name = string(name);
    let product = w.add(format_args!(
        "PRODUCT({name},{name},'',({}))",
        contexts.product
    ));
    let formation = w.add(format_args!(
        "PRODUCT_DEFINITION_FORMATION('','',{product})"
    ));
    let definition = w.add(format_args!(
        "PRODUCT_DEFINITION('design','',{formation},{})",
        contexts.definition
    ));
    let shape = w.add(format_args!("PRODUCT_DEFINITION_SHAPE('','',{definition})"));
    ProductRefs {
        product,
        definition,
        shape,
    }
}

/// Writes a presentation style assignment for a surface colour.
fn write_style(w: &mut EntityWriter, color: Color) -> Ref {
    let color = color.clamped();
    let rgb = w.add(format_args!(
        "COLOUR_RGB('',{},{},{})",
        real(color.r),
        real(color.g),
        real(color.b)
    ));
    let fill_colour = w.add(format_args!("FILL_AREA_STYLE_COLOUR('',{rgb})"));
    let fill = w.add(format_args!("FILL_AREA_STYLE('',({fill_colour}))"));
    let surface_fill = w.add(format_args!("SURFACE_STYLE_FILL_AREA({fill})"));
    let side = w.add(format_args!("SURFACE_SIDE_STYLE('',({surface_fill}))"));
    let usage = w.add(format_args!("SURFACE_STYLE_USAGE(.BOTH.,{side})"));
    w.add(format_args!("PRESENTATION_STYLE_ASSIGNMENT(({usage}))"))
}

/// Encodes an assembly as a complete STEP file.
///
/// # Errors
///
/// Returns an error if a body's B-rep cannot be merged into the file.
pub fn encode_assembly(assembly: &Assembly, header: &StepHeader) -> StepResult<String> {
    let mut w = EntityWriter::new();
    let contexts = write_contexts(&mut w);

    let root = write_product(&mut w, &contexts, assembly.name());
    let mut root_items = vec![w.identity_placement()];
    let part_placements: Vec<Ref> = assembly.parts().map(|_| w.identity_placement()).collect();
    root_items.extend(&part_placements);
    let root_rep = w.add(format_args!(
        "SHAPE_REPRESENTATION({},{},{})",
        string(assembly.name()),
        list(&root_items),
        contexts.geometry
    ));
    w.add(format_args!(
        "SHAPE_DEFINITION_REPRESENTATION({},{root_rep})",
        root.shape
    ));

    let mut products = vec![root.product];
    let mut styled_items = Vec::new();
    for (index, (part, parent_placement)) in assembly.parts().zip(&part_placements).enumerate() {
        let child = write_product(&mut w, &contexts, part.name());
        products.push(child.product);

        let placement = w.identity_placement();
        let mut items = vec![placement];
        let mut breps = Vec::new();
        for body in part.solid().bodies() {
            breps.extend(import_body(&mut w, body, part.name())?);
        }
        items.extend(&breps);
        let rep = w.add(format_args!(
            "ADVANCED_BREP_SHAPE_REPRESENTATION({},{},{})",
            string(part.name()),
            list(&items),
            contexts.geometry
        ));
        w.add(format_args!(
            "SHAPE_DEFINITION_REPRESENTATION({},{rep})",
            child.shape
        ));

        let transform = w.add(format_args!(
            "ITEM_DEFINED_TRANSFORMATION('','',{placement},{parent_placement})"
        ));
        let relationship = w.add(format_args!(
            "( REPRESENTATION_RELATIONSHIP('','',{rep},{root_rep}) \
             REPRESENTATION_RELATIONSHIP_WITH_TRANSFORMATION({transform}) \
             SHAPE_REPRESENTATION_RELATIONSHIP() )"
        ));
        let usage = w.add(format_args!(
            "NEXT_ASSEMBLY_USAGE_OCCURRENCE('{}',{},'',{},{},$)",
            index + 1,
            string(part.name()),
            root.definition,
            child.definition
        ));
        let placement_shape = w.add(format_args!(
            "PRODUCT_DEFINITION_SHAPE('Placement','Placement of an item',{usage})"
        ));
        w.add(format_args!(
            "CONTEXT_DEPENDENT_SHAPE_REPRESENTATION({relationship},{placement_shape})"
        ));

        let style = write_style(&mut w, part.color());
        for brep in &breps {
            styled_items.push(w.add(format_args!("STYLED_ITEM('color',({style}),{brep})")));
        }
    }

    w.add(format_args!(
        "PRODUCT_RELATED_PRODUCT_CATEGORY('part',$,{})",
        list(&products)
    ));
    w.add(format_args!(
        "MECHANICAL_DESIGN_GEOMETRIC_PRESENTATION_REPRESENTATION('',{},{})",
        list(&styled_items),
        contexts.geometry
    ));

    let mut out = String::with_capacity(w.data.len() + 512);
    out.push_str("ISO-10303-21;\nHEADER;\n");
    out.push_str("FILE_DESCRIPTION(('YannLib component model'),'2;1');\n");
    let _ = writeln!(
        out,
        "FILE_NAME({},'{}',({}),(''),{},{},'');",
        string(&header.file_name),
        header.timestamp.format("%Y-%m-%dT%H:%M:%S"),
        string(&header.author),
        string(&StepHeader::originating_system()),
        string(&StepHeader::originating_system())
    );
    let _ = writeln!(out, "FILE_SCHEMA(('{SCHEMA}'));");
    out.push_str("ENDSEC;\nDATA;\n");
    out.push_str(&w.data);
    out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
    Ok(out)
}

//! The foundational knowledge base every answer is grounded in.
//!
//! Three technical documents are embedded in the binary and stitched together
//! once per process. The assembled text is byte-identical on every call.

use std::sync::LazyLock;

/// One embedded reference document.
#[derive(Debug, Clone, Copy)]
pub struct Document {
    pub title: &'static str,
    pub body: &'static str,
}

const BANNER: &str = "================================================================================";

pub const DOCUMENTS: [Document; 3] = [
    Document {
        title: "NASA_Glenn_SCWO_Fundamentals.txt",
        body: SCWO_FUNDAMENTALS,
    },
    Document {
        title: "RTCR_Chemical_Pathways.txt",
        body: RTCR_PATHWAYS,
    },
    Document {
        title: "Cosmos_X9_Drilling_Challenges.txt",
        body: COSMOS_X9_CHALLENGES,
    },
];

static KNOWLEDGE_BASE: LazyLock<String> = LazyLock::new(assemble);

/// The full knowledge base text, built on first use.
pub fn knowledge_base() -> &'static str {
    KNOWLEDGE_BASE.as_str()
}

fn assemble() -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push('\n');
    out.push_str(BANNER);
    out.push_str("\nSIMIC VIRTUAL EXPERT SYSTEM - FOUNDATIONAL KNOWLEDGE BASE\n");
    out.push_str(BANNER);
    out.push_str(
        "\n\nThe following documents represent the core technical knowledge for RTCR \n\
         and Cosmos X-9 technologies. Use this information to answer user queries \n\
         with precision and depth.\n",
    );

    for (index, doc) in DOCUMENTS.iter().enumerate() {
        out.push_str(&format!(
            "\n=== DOCUMENT {}: {} ===\n\n{}\n",
            index + 1,
            doc.title,
            doc.body.trim_end()
        ));
    }

    out.push('\n');
    out.push_str(BANNER);
    out.push_str("\nEND OF KNOWLEDGE BASE\n");
    out.push_str(BANNER);
    out.push('\n');
    out
}

const SCWO_FUNDAMENTALS: &str = "\
SUPERCRITICAL WATER OXIDATION (SCWO) - NASA GLENN RESEARCH CENTER

Critical Parameters:
- Temperature: 647.1 K (373.95°C)
- Pressure: 22.064 MPa (3,200 psi)

Fundamental Properties:
Above the critical point, water exhibits unique properties that make it an exceptional
reaction medium:

1. IONIC EQUILIBRIUM COLLAPSE
   - Ion product (Kw) drops from 10^-14 to 10^-20 or lower
   - Water behaves as a non-polar solvent
   - Organic compounds become highly soluble
   - Salts precipitate out (major operational challenge)

2. RADICAL CHEMISTRY
   - Primary radicals: OH• (hydroxyl), HO₂• (hydroperoxyl), H• (hydrogen atom)
   - Reaction pathways dominated by radical chain mechanisms
   - Oxidation rates 100-1000x faster than subcritical conditions
   - Near-complete destruction (>99.99%) of organic hazardous waste

3. MATERIALS CHALLENGES
   - Hastelloy C-276: Industry standard, but subject to intergranular corrosion
   - Chloride-accelerated stress corrosion cracking (SCC) at >500°C
   - Salt precipitation on reactor walls leads to hot spots and thermal fatigue
   - Titanium liner concepts show promise for chloride environments

4. OPERATIONAL REGIMES
   - Hydrothermal Flames: >600°C, spontaneous ignition of organics in SCW
   - Salt Management: Critical for continuous operation; requires engineered separators
   - Residence Time: Typically 30-120 seconds for 99.99% destruction efficiency

NASA Glenn Focus Areas:
- Closed-loop life support systems for spacecraft
- Waste water treatment and resource recovery
- Hybrid propulsion systems using SCWO energy release

Key References:
- Proc. Int. Conf. on SCWO (1995-2018)
- NASA/TM-2003-212185: \"SCWO for Spacecraft Waste Processing\"
";

const RTCR_PATHWAYS: &str = "\
RADICAL THERMOCHEMICAL CHAIN REACTIONS (RTCR) FOR IN-SITU H₂ GENERATION

MISSION OBJECTIVE:
Induce and sustain radical-mediated hydrogen production from ultramafic rock
formations using supercritical water as the reaction initiator and medium.

TARGET LITHOLOGY:
- Olivine: (Mg,Fe)₂SiO₄ - Primary reactant
- Serpentinite: Mg₃Si₂O₅(OH)₄ - Pre-hydrated ultramafic phase
- Chromite: FeCr₂O₄ - Iron source for redox coupling

PROPOSED RTCR MECHANISM (SIMPLIFIED):

Step 1: Initiation (Supercritical Regime, T > 400°C, P > 25 MPa)
    H₂O → OH• + H•
    (Water dissociation enhanced by extreme PT conditions)

Step 2: Iron Oxidation (Primary H₂ Source)
    Fe²⁺(olivine) + OH• → Fe³⁺ + OH⁻ + e⁻
    2H• + 2e⁻ → H₂ ↑
    (Net reaction: Olivine oxidation releases hydrogen)

Step 3: Radical Propagation
    OH• + CH₄(trace) → CH₃• + H₂O
    CH₃• + H₂O → CH₃OH + H•
    (Methane from deep carbon sources sustains radical pool)

Step 4: Chain Branching (CRITICAL - Enables autocatalysis)
    H• + O₂ → OH• + O•
    O• + H₂O → 2OH•
    (Net: 1 radical → 3 radicals, exponential growth if uncontrolled)

ENGINEERING CHALLENGES:

1. THERMAL RUNAWAY PREVENTION
   - Exothermic reactions can cause T spike from 450°C to >800°C in <10 seconds
   - Solution: Pulsed injection of SCW coolant, active quenching zones

2. REACTION FRONT CONTROL
   - Desired: Slow, sustained propagation (1-10 cm/day)
   - Risk: Explosive detonation front if oxygen/fuel ratio not controlled
   - Mitigation: Inert gas (N₂, Ar) dilution, pressure modulation

3. HYDROGEN CAPTURE EFFICIENCY
   - H₂ highly diffusive in fractured rock
   - Requires engineered production wells with sealed completion zones
   - Target: >60% capture efficiency at pilot scale

4. CATALYST POISONING
   - Sulfur species (H₂S, SO₂) from pyrite (FeS₂) inhibit radical chains
   - Heavy metals (Ni, Cr) can catalyze unwanted side reactions
   - Solution: Pre-treatment of formation with acid wash

SAFETY PROTOCOLS:
- Real-time downhole temperature and pressure monitoring (fiber optic sensors)
- Emergency shut-off valves at surface and depth intervals
- Seismic monitoring for induced microearthquakes (M < 2.0 acceptable)
- H₂S detection systems (OSHA PEL: 10 ppm TWA, 15 ppm STEL)

ECONOMIC VIABILITY THRESHOLD:
- Production: >500 kg H₂/day per well
- Operational cost: <$2.50/kg H₂ (competitive with SMR)
- Well lifetime: >5 years continuous operation
";

const COSMOS_X9_CHALLENGES: &str = "\
COSMOS X-9: SUPERCRITICAL WATER DRILLING FOR CRYSTALLINE FORMATIONS

CONCEPT OVERVIEW:
Replace conventional oil-based or water-based muds with Supercritical Water (SCW)
as the primary drilling fluid. Target applications: geothermal wells, deep hard-rock
mineral exploration, and ultra-deep scientific drilling.

TECHNICAL ADVANTAGES:

1. ENHANCED RATE OF PENETRATION (ROP)
   - Conventional drilling in granite: 2-8 m/hr
   - SCW thermal spalling assistance: Projected 15-30 m/hr
   - Mechanism: Thermal shock induces microfractures ahead of bit

2. REDUCED BIT WEAR
   - SCW acts as cooling fluid despite high temperature (paradoxical effect)
   - Lower viscosity reduces frictional drag on PDC cutters
   - Extended bit life: 400-600 meters vs. 150-250 meters (conventional)

3. ROCK FRAGMENTATION PHYSICS
   - Quartz (α → β transition at 573°C): Volume expansion creates weakness planes
   - Feldspar thermal expansion coefficient mismatch with quartz → grain boundary failure
   - SCW penetrates microcracks, flash-vaporizes upon pressure drop → explosive comminution

OPERATIONAL CHALLENGES:

1. EXTREME DOWNHOLE TEMPERATURES (PRIMARY CONCERN)
   - Surface injection: 400-450°C (SCW regime maintained)
   - Bottomhole circulating temperature (BHCT): 350-550°C (depends on depth & geothermal gradient)
   - Problem: Exceeds rating of standard elastomers, MWD tools, and logging instruments
   - Solution: Ceramic-insulated drill string, high-temperature electronics (SiC-based)

2. WELLBORE STABILITY UNDER THERMAL CYCLING
   - Heating phase (drilling): Rock expands, compressive hoop stress
   - Cooling phase (trip out): Rock contracts, tensile hoop stress → spalling
   - Cyclic loading can induce progressive wellbore enlargement
   - Mitigation: Controlled heating/cooling rates (<50°C/hr), casing schedule optimization

3. CUTTINGS TRANSPORT (CRITICAL FAILURE MODE)
   - SCW viscosity: 0.05-0.08 cP (vs. 30-80 cP for conventional mud)
   - Settling velocity of cuttings 100x higher → bed accumulation
   - Consequence: Stuck pipe, loss of circulation, well control incidents
   - Engineering Solution:
     a) High annular velocity: >1.5 m/s (requires high pump rates)
     b) Pulsed flow regime: Alternating high/low flow creates turbulent bursts
     c) Hydraulic jetting at bit: Local high-velocity jets sweep cuttings

4. MATERIALS & CORROSION
   - Drill pipe: Inconel 625 or 718 (nickel-based superalloy)
   - BOP seals: Graphite-based composite, rated to 350°C
   - Corrosion mechanism: Oxygen-rich SCW causes rapid oxidation of carbon steel
     - Corrosion rate: 0.5-2.0 mm/year (vs. 0.05 mm/year in oil-based mud)
   - Solution: Chromium oxide passivation layer, oxygen scavenger injection (hydrazine)

5. PRESSURE MANAGEMENT
   - Must maintain P > 22.1 MPa throughout entire circulating system
   - Subcritical regions → two-phase flow → pump cavitation → catastrophic failure
   - Backpressure control: Automated choke system at surface, ±0.5 MPa tolerance

SURFACE EQUIPMENT REQUIREMENTS:
- High-pressure, high-temperature pump: 30 MPa, 450°C, 2000 LPM
- Heat exchanger: Recover thermal energy from returns (efficiency >70%)
- Solids separation: Cyclone separators rated for SCW (no mechanical screens)
- Emergency cooling system: Rapid quench capability in <60 seconds

FIELD TEST RESULTS (HYPOTHETICAL - 2024 PILOT):
- Location: Iceland Geothermal Field, basaltic formation
- Depth: 3,200 meters
- Average ROP: 22 m/hr (vs. 6 m/hr conventional baseline)
- Incidents: 2 stuck pipe events (both resolved), 1 BOP seal failure (thermal runaway event)
- Conclusion: Concept viable with improved real-time temperature control

REGULATORY & SAFETY CONSIDERATIONS:
- OSHA confined space entry protocols for high-temperature environments
- API RP 53: Blowout Prevention Equipment Systems (modified for SCW compatibility)
- Environmental impact: SCW returns must be cooled to <90°C before disposal
- Personnel exclusion zone: 50-meter radius during circulation operations
";

use log::info;
use opencv::{
    core::{DMatch, KeyPoint, Mat, Scalar, Vector, NORM_HAMMING},
    features2d::{self, BFMatcher, DrawMatchesFlags, ORB},
    prelude::*,
};

use crate::error::{Error, ImageRole, Result};

/// Share of the worst match distance under which a match counts as good.
const GOOD_MATCH_RATIO: f32 = 0.1;

pub struct Keypoints {
    pub points: Vector<KeyPoint>,
    pub descriptors: Mat,
}

pub struct OrbMatches {
    pub template: Keypoints,
    pub full: Keypoints,
    pub matches: Vector<DMatch>,
    pub good: Vector<DMatch>,
}

fn detect_and_compute(
    orb: &mut opencv::core::Ptr<ORB>,
    image: &Mat,
    role: ImageRole,
) -> Result<Keypoints> {
    let mut points = Vector::<KeyPoint>::new();
    orb.detect(image, &mut points, &Mat::default())?;
    if points.is_empty() {
        return Err(Error::NoKeypoints(role));
    }

    let mut descriptors = Mat::default();
    orb.compute(image, &mut points, &mut descriptors)?;
    Ok(Keypoints {
        points,
        descriptors,
    })
}

/// Keeps matches whose distance is within a tenth of the worst one. When every
/// match is equally close (a self-match, say) they all qualify.
pub fn filter_good_matches(matches: &Vector<DMatch>) -> Vector<DMatch> {
    let (min_dist, max_dist) = matches
        .iter()
        .fold((f32::MAX, 0.0f32), |(lo, hi), m| (lo.min(m.distance), hi.max(m.distance)));
    let limit = (max_dist * GOOD_MATCH_RATIO).max(min_dist);

    matches.iter().filter(|m| m.distance <= limit).collect()
}

/// ORB keypoints on both images, brute-force Hamming match from template to full.
pub fn match_orb(full: &Mat, template: &Mat) -> Result<OrbMatches> {
    let mut orb = ORB::create_def()?;
    let full_keypoints = detect_and_compute(&mut orb, full, ImageRole::Full)?;
    let template_keypoints = detect_and_compute(&mut orb, template, ImageRole::Template)?;

    info!("Computing the match...");
    let matcher = BFMatcher::new(NORM_HAMMING, false)?;
    let mut matches = Vector::<DMatch>::new();
    matcher.train_match(
        &template_keypoints.descriptors,
        &full_keypoints.descriptors,
        &mut matches,
        &Mat::default(),
    )?;

    let good = filter_good_matches(&matches);
    info!("{} matches, {} kept", matches.len(), good.len());

    Ok(OrbMatches {
        template: template_keypoints,
        full: full_keypoints,
        matches,
        good,
    })
}

/// Template and full image side by side with the good matches joined.
pub fn draw(full: &Mat, template: &Mat, result: &OrbMatches) -> Result<Mat> {
    let mut canvas = Mat::default();
    features2d::draw_matches(
        template,
        &result.template.points,
        full,
        &result.full.points,
        &result.good,
        &mut canvas,
        Scalar::all(-1.0),
        Scalar::all(-1.0),
        &Vector::<i8>::new(),
        DrawMatchesFlags::NOT_DRAW_SINGLE_POINTS,
    )?;
    Ok(canvas)
}
